use std::fs::{self, File};

use super::common::rng_str;

/// A file under `/tmp` that deletes itself on drop, for disposable
/// catalog/CSV test fixtures.
#[derive(Debug)]
pub struct TempFile {
    pub filepath: String,
}

impl TempFile {
    pub fn new(filepath: &str) -> std::io::Result<TempFile> {
        File::create(filepath)?;
        Ok(TempFile {
            filepath: filepath.to_owned(),
        })
    }

    pub fn default_in_dir(dir: &str, ext: &str) -> std::io::Result<TempFile> {
        let rndstr = rng_str(12);
        let filepath = format!("{}/{}.{}", dir, &rndstr, ext);
        TempFile::new(&filepath)
    }

    pub fn get_mut(&self) -> std::io::Result<File> {
        File::create(&self.filepath)
    }
}

impl Default for TempFile {
    fn default() -> Self {
        let rndstr = rng_str(12);
        let filepath = format!("/tmp/{}", &rndstr);
        TempFile::new(&filepath).unwrap()
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        fs::remove_file(&self.filepath).unwrap_or_else(|_| panic!("Failed to delete TempFile {}", &self.filepath));
    }
}
