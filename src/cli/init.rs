use crate::categorizer::CategoryMap;
use crate::error::Result;
use crate::settings::{
    default_categories_path, load_settings, save_settings, settings_file_exists, shellexpand_path,
};

pub fn run(categories: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    let path = match categories {
        Some(p) => shellexpand_path(&p),
        None => {
            let path = default_categories_path();
            if path.exists() {
                println!("Keeping existing category map: {}", path.display());
            } else {
                if let Some(dir) = path.parent() {
                    std::fs::create_dir_all(dir)?;
                }
                std::fs::write(&path, format!("{}\n", CategoryMap::builtin().to_json()?))?;
                println!("Wrote default category map: {}", path.display());
            }
            path.to_string_lossy().to_string()
        }
    };

    let existed = settings_file_exists();
    settings.categories_path = Some(path);
    save_settings(&settings)?;
    if existed {
        println!("Settings updated.");
    } else {
        println!("Settings created.");
    }
    Ok(())
}
