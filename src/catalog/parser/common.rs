use std::{
    collections::HashMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::util::error::{CpError, CpResult};

/// Extension trait over `serde_yaml_ng::Value` for pulling the ordered
/// entries out of a catalog config node.
pub trait YamlRead {
    /// Preserves the mapping's own key order, since `serde_yaml_ng::Mapping`
    /// is itself insertion-ordered — this is how "catalog order" is
    /// threaded through the pack without a separate ordered-map dependency.
    fn to_ordered_pairs(&self) -> CpResult<Vec<(String, serde_yaml_ng::Value)>>;
}

impl YamlRead for serde_yaml_ng::Value {
    fn to_ordered_pairs(&self) -> CpResult<Vec<(String, serde_yaml_ng::Value)>> {
        let mapping = self
            .as_mapping()
            .ok_or_else(|| CpError::ConfigError("catalog.parser", format!("Not a map: {:?}", self)))?;
        let mut pairs = Vec::with_capacity(mapping.len());
        for (k, v) in mapping {
            let key = k
                .as_str()
                .ok_or_else(|| CpError::ConfigError("catalog.parser", format!("Non-string key: {:?}", k)))?;
            pairs.push((key.to_owned(), v.clone()));
        }
        Ok(pairs)
    }
}

/// Walks `dir` (path-sorted, for deterministic catalog order) for files with
/// one of `file_exts`.
pub fn read_configs(dir: &str, file_exts: &[&str]) -> CpResult<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|res| res.ok())
        .map(|dir_entry| dir_entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| file_exts.contains(&ext))
        })
        .collect();
    paths.sort();
    Ok(paths)
}

/// `{configurable_name -> [(entry_name, node), ...]}`, entries kept in the
/// order they are first encountered while walking `paths`. This is "catalog
/// order": insertion order into an `IndexMap`-like structure, not
/// lexicographic by id.
pub type ConfigPack = HashMap<String, Vec<(String, serde_yaml_ng::Value)>>;

/// Folds every top-level key of each YAML document in `paths` into a single
/// pack, one entry per named catalog node.
pub fn pack_configs_from_files<P: AsRef<Path>>(paths: &[P]) -> CpResult<ConfigPack> {
    let mut config_pack: ConfigPack = HashMap::new();
    for path in paths {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let yaml_root: serde_yaml_ng::Value = serde_yaml_ng::from_reader(reader)?;
        pack_configurables(&mut config_pack, yaml_root)?;
    }
    Ok(config_pack)
}

fn pack_configurables(config_pack: &mut ConfigPack, yaml_root: serde_yaml_ng::Value) -> CpResult<()> {
    let top_level = yaml_root.to_ordered_pairs()?;
    for (configurable_name, value) in top_level {
        let node_fields = value.to_ordered_pairs()?;
        let entries = config_pack.entry(configurable_name).or_default();
        for (entry_name, node) in node_fields {
            match entries.iter_mut().find(|(name, _)| *name == entry_name) {
                Some(existing) => existing.1 = node,
                None => entries.push((entry_name, node)),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::util::tmp::TempFile;

    use super::*;

    #[test]
    fn valid_pack_configs_from_files() {
        let dir_path = "/tmp/srcm_testing/valid_pack_configs_from_files/";
        fs::create_dir_all(dir_path).unwrap();
        let tmp_a = TempFile::default_in_dir(dir_path, "yml").unwrap();
        use std::io::Write;
        tmp_a
            .get_mut()
            .unwrap()
            .write_all(
                b"
data_system:
    hospital_a:
        name: Hospital A
",
            )
            .unwrap();
        let actual = pack_configs_from_files(&[PathBuf::from(&tmp_a.filepath)]).unwrap();
        assert_eq!(actual.get("data_system").unwrap().len(), 1);
        fs::remove_dir(dir_path).unwrap();
    }

    #[test]
    fn read_configs_filters_by_extension_and_sorts() {
        let dir_path = "/tmp/srcm_testing/read_configs_filter/";
        fs::create_dir_all(dir_path).unwrap();
        let a = TempFile::new(&format!("{}b.yml", dir_path)).unwrap();
        let b = TempFile::new(&format!("{}a.yaml", dir_path)).unwrap();
        let _c = TempFile::new(&format!("{}c.txt", dir_path)).unwrap();
        let actual = read_configs(dir_path, &["yml", "yaml"]).unwrap();
        assert_eq!(actual, vec![PathBuf::from(&b.filepath), PathBuf::from(&a.filepath)]);
        fs::remove_dir(dir_path).unwrap();
    }
}
