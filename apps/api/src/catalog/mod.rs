//! Program catalog: the static, read-only list of programs the matcher searches.
//!
//! Loaded once at startup (embedded dataset or `CATALOG_PATH`) and shared as
//! `Arc<Catalog>`; nothing mutates it afterwards.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;

const EMBEDDED_CATALOG: &str = include_str!("../../data/programs.json");

/// How a program is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryFormat {
    InPerson,
    Online,
    Hybrid,
}

impl DeliveryFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryFormat::InPerson => "in-person",
            DeliveryFormat::Online => "online",
            DeliveryFormat::Hybrid => "hybrid",
        }
    }
}

impl FromStr for DeliveryFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in-person" => Ok(DeliveryFormat::InPerson),
            "online" => Ok(DeliveryFormat::Online),
            "hybrid" => Ok(DeliveryFormat::Hybrid),
            other => Err(format!("unknown delivery format '{other}'")),
        }
    }
}

/// One offered academic program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProgram {
    pub id: String,
    pub university: String,
    pub name: String,
    pub field: Vec<String>,
    pub degree: String,
    pub location: String,
    pub tuition_usd: u32,
    pub format: Vec<DeliveryFormat>,
    pub description: String,
}

impl CatalogProgram {
    /// Text the matcher embeds for this program.
    pub fn search_text(&self) -> String {
        [
            self.name.as_str(),
            self.university.as_str(),
            self.field.join(" ").as_str(),
            self.description.as_str(),
            self.location.as_str(),
        ]
        .join(" ")
    }

    pub fn offers_any(&self, formats: &[DeliveryFormat]) -> bool {
        formats.iter().any(|f| self.format.contains(f))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    programs: Vec<CatalogProgram>,
}

impl Catalog {
    /// Parses a JSON array of programs. Rejects blank or duplicate ids.
    pub fn from_json_str(raw: &str) -> Result<Self, AppError> {
        let programs: Vec<CatalogProgram> = serde_json::from_str(raw)
            .map_err(|e| AppError::Catalog(format!("invalid catalog JSON: {e}")))?;
        Self::from_programs(programs)
    }

    pub fn from_programs(programs: Vec<CatalogProgram>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for program in &programs {
            if program.id.trim().is_empty() {
                return Err(AppError::Catalog(format!(
                    "program '{}' has an empty id",
                    program.name
                )));
            }
            if !seen.insert(program.id.as_str()) {
                return Err(AppError::Catalog(format!(
                    "duplicate program id '{}'",
                    program.id
                )));
            }
        }
        Ok(Catalog { programs })
    }

    /// The dataset compiled into the binary.
    pub fn embedded() -> Result<Self, AppError> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let catalog = Self::from_json_str(&raw)
            .with_context(|| format!("Failed to parse catalog file {}", path.display()))?;
        info!("Loaded {} programs from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn programs(&self) -> &[CatalogProgram] {
        &self.programs
    }

    pub fn get(&self, id: &str) -> Option<&CatalogProgram> {
        self.programs.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn program(
        id: &str,
        name: &str,
        field: &[&str],
        degree: &str,
        tuition_usd: u32,
        format: &[DeliveryFormat],
        description: &str,
    ) -> CatalogProgram {
        CatalogProgram {
            id: id.to_string(),
            university: "Test University".to_string(),
            name: name.to_string(),
            field: field.iter().map(|f| f.to_string()).collect(),
            degree: degree.to_string(),
            location: "Boston, MA".to_string(),
            tuition_usd,
            format: format.to_vec(),
            description: description.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::fixtures::program;
    use super::*;

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = Catalog::embedded().unwrap();
        assert!(!catalog.is_empty());
        for p in catalog.programs() {
            assert!(!p.format.is_empty(), "{} has no formats", p.id);
        }
    }

    #[test]
    fn test_delivery_format_wire_names() {
        let json = serde_json::to_string(&DeliveryFormat::InPerson).unwrap();
        assert_eq!(json, r#""in-person""#);
        assert_eq!("hybrid".parse::<DeliveryFormat>(), Ok(DeliveryFormat::Hybrid));
        assert!("remote".parse::<DeliveryFormat>().is_err());
    }

    #[test]
    fn test_program_uses_camel_case_tuition() {
        let p = program("x", "MS X", &["X"], "Master's", 100, &[DeliveryFormat::Online], "");
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["tuitionUsd"], 100);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let p = program("dup", "A", &[], "Master's", 1, &[DeliveryFormat::Online], "");
        let err = Catalog::from_programs(vec![p.clone(), p]).unwrap_err();
        assert!(err.to_string().contains("duplicate program id 'dup'"));
    }

    #[test]
    fn test_blank_id_rejected() {
        let p = program("  ", "A", &[], "Master's", 1, &[DeliveryFormat::Online], "");
        assert!(Catalog::from_programs(vec![p]).is_err());
    }

    #[test]
    fn test_invalid_json_is_catalog_error() {
        let err = Catalog::from_json_str("not json").unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::from_programs(vec![program(
            "ms-ds",
            "MS Data Science",
            &["Data Science"],
            "Master's",
            30000,
            &[DeliveryFormat::Hybrid],
            "",
        )])
        .unwrap();
        assert_eq!(catalog.get("ms-ds").map(|p| p.name.as_str()), Some("MS Data Science"));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_search_text_concatenates_fields() {
        let p = program(
            "x",
            "MS Robotics",
            &["Robotics", "AI"],
            "Master's",
            1,
            &[DeliveryFormat::InPerson],
            "Autonomous systems",
        );
        assert_eq!(
            p.search_text(),
            "MS Robotics Test University Robotics AI Autonomous systems Boston, MA"
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"a","university":"U","name":"N","field":[],"degree":"Master's",
                "location":"L","tuitionUsd":10,"format":["online"],"description":""}}]"#
        )
        .unwrap();
        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(Catalog::load("/nonexistent/catalog.json").is_err());
    }
}
