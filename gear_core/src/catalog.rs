use crate::equipment::Equipment;
use crate::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// On-disk layout of a gear file
#[derive(Debug, Deserialize)]
struct GearFileConfig {
    #[serde(default)]
    equipment: Vec<Equipment>,
}

/// Registry of equipment templates, loaded from TOML or JSON files
#[derive(Debug, Default)]
pub struct GearCatalog {
    templates: HashMap<String, Equipment>,
}

impl GearCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every gear file in a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        catalog.load_dir(dir)?;
        Ok(catalog)
    }

    fn load_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        // Sorted so duplicate-id errors always name the same file
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            paths.push(entry.path());
        }
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml" || ext == "json") {
                self.load_file(&path)?;
            }
        }

        Ok(())
    }

    /// Load a single gear file
    pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;

        let config: GearFileConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| ConfigError::Json {
                error: e,
                path: path.to_path_buf(),
            })?
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                error: e,
                path: path.to_path_buf(),
            })?
        };

        for equipment in config.equipment {
            if self.templates.contains_key(&equipment.id) {
                return Err(ConfigError::Validation {
                    message: format!("duplicate equipment id '{}'", equipment.id),
                    path: path.to_path_buf(),
                });
            }
            self.templates.insert(equipment.id.clone(), equipment);
        }
        Ok(())
    }

    /// Register a template directly
    pub fn insert(&mut self, equipment: Equipment) -> Option<Equipment> {
        self.templates.insert(equipment.id.clone(), equipment)
    }

    /// Get a template by ID
    pub fn get(&self, id: &str) -> Option<&Equipment> {
        self.templates.get(id)
    }

    /// Check if a template exists
    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// List all template IDs
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Build a fresh, independently owned piece of equipment from a template
    pub fn create(&self, id: &str) -> Option<Equipment> {
        self.templates.get(id).cloned()
    }
}
