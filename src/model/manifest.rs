use serde::Deserialize;

/// Uploaded manifest, either the `data.json` inside an archive or a raw JSON
/// upload. Unknown extra fields are ignored; a missing `characters` key is an
/// `InvalidFormat` ingest failure.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub characters: Vec<ManifestCharacter>,
}

/// One character entry from a manifest. Every field is optional and defaults
/// to the empty string; a blank `name` is permitted.
#[derive(Debug, Default, Deserialize)]
pub struct ManifestCharacter {
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub series: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub image: String,
}
