use anyhow::Context;
use mediflow_core::{config::Config, io, paths, seed, source::FileSource};
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let project_name = match name {
        Some(n) => n.to_string(),
        None => root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mediflow".to_string()),
    };

    println!("Initializing MediFlow in: {}", root.display());

    let dir = root.join(paths::MEDIFLOW_DIR);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    if !paths::is_initialized(root) {
        Config::new(&project_name)
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    if !paths::data_dir(root).is_dir() {
        let data = seed::dataset().context("failed to parse demo dataset")?;
        FileSource::new(root)
            .write_dataset(&data)
            .context("failed to write demo dataset")?;
        println!("  created: {}/", paths::DATA_DIR);
    } else {
        println!("  exists:  {}/", paths::DATA_DIR);
    }

    println!("\nMediFlow initialized. Next: mediflow stats");
    Ok(())
}
