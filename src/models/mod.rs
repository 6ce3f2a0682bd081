pub mod article;
pub mod comment;

use serde::{Deserialize, Deserializer};

// Las columnas booleanas pueden venir como NULL desde el almacén
pub(crate) fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
