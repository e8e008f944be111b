use std::{fs, path::Path};

use anyhow::Context;

use crate::SledKvStore;

/// Database name used under `<datadir>/sled/`.
pub const SLED_NAME: &str = "qgb";

/// Opens the sled database from datadir, creating the directory if needed.
pub fn open_sled_database(datadir: &Path, dbname: &'static str) -> anyhow::Result<SledKvStore> {
    let mut database_dir = datadir.to_path_buf();
    database_dir.push("sled");
    database_dir.push(dbname);

    if !database_dir.exists() {
        fs::create_dir_all(&database_dir)?;
    }

    let sled_db = sled::open(&database_dir).context("opening sled database")?;
    SledKvStore::new(&sled_db).context("opening state tree")
}
