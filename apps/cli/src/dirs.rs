use std::path::PathBuf;

const DATA_DIR_NAME: &str = "meter-tracker";
const DB_FILE_NAME: &str = "meter-tracker.sqlite";

#[derive(Debug, Clone)]
pub struct DataDirResolution {
    pub dir: PathBuf,
    pub matched_existing: bool,
}

/// Picks the first candidate that already holds a database, else the XDG location.
pub fn resolve_data_dir() -> Result<DataDirResolution, String> {
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    let home = PathBuf::from(home);
    let xdg = std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| home.join(".local").join("share"));

    let candidates = [
        xdg.join(DATA_DIR_NAME),
        home.join("Library")
            .join("Application Support")
            .join(DATA_DIR_NAME),
    ];

    for candidate in &candidates {
        if candidate.join(DB_FILE_NAME).exists() {
            return Ok(DataDirResolution {
                dir: candidate.clone(),
                matched_existing: true,
            });
        }
    }

    Ok(DataDirResolution {
        dir: xdg.join(DATA_DIR_NAME),
        matched_existing: false,
    })
}
