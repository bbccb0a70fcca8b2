//! Records stored in the collection files
//!
//! Field names on the wire are the Portuguese keys used by the JSON files
//! and by the mobile client (`nome`, `finalidade`, `valor_venda`, ...). The
//! Rust side uses English names and serde renames.

use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::validation::{integer_in_range, non_blank_string, required};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Implements the label handling shared by the wire enums.
///
/// The first label of each variant is the one written back to disk; every
/// label is accepted case-insensitively when reading.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $($variant:ident => [$($label:literal),+ $(,)?]),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Label written to the collection files
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => [$($label),+][0]),+
                }
            }

            /// Parse any accepted label, ignoring case and surrounding whitespace
            pub fn parse(value: &str) -> Option<Self> {
                let value = value.trim().to_lowercase();
                $(
                    if [$($label),+].iter().any(|l| *l == value) {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                $name::parse(&raw).ok_or_else(|| {
                    de::Error::custom(format!("unknown {} '{}'", $what, raw))
                })
            }
        }
    };
}

wire_enum! {
    /// What a property is offered for
    Purpose, "purpose" {
        Rent => ["alugar", "aluguel", "locacao", "locação", "rent"],
        Buy => ["comprar", "venda", "buy"],
        Exchange => ["permuta", "exchange"],
        Seasonal => ["temporada", "seasonal"],
    }
}

wire_enum! {
    /// Publication state of a property listing
    Status, "status" {
        Published => ["publicado", "published"],
        Draft => ["rascunho", "draft"],
        Trashed => ["lixo", "trashed"],
    }
}

/// Typed view of a listing, used for filtering
///
/// Unknown purpose or status labels never fail a load: an unrecognised
/// purpose is left out of `purpose` and an unrecognised status reads as
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFields {
    pub id: i64,

    #[serde(rename = "nome")]
    pub name: String,

    /// `None` when the listing carries no purpose at all
    #[serde(rename = "finalidade", default, deserialize_with = "purposes")]
    pub purpose: Option<Vec<Purpose>>,

    /// Free-text category (Casa, Terreno, Sala, ...)
    #[serde(rename = "tipo")]
    pub kind: String,

    #[serde(default, deserialize_with = "known_status")]
    pub status: Option<Status>,

    #[serde(rename = "imagem", default)]
    pub image: String,

    #[serde(rename = "descricao", default)]
    pub description: String,

    #[serde(rename = "valor_aluguel", deserialize_with = "lenient_f64")]
    pub rent_price: f64,

    #[serde(rename = "valor_venda", deserialize_with = "lenient_f64")]
    pub sale_price: f64,

    #[serde(rename = "bairro")]
    pub neighborhood: String,

    #[serde(rename = "area_terreno", deserialize_with = "lenient_f64")]
    pub lot_area: f64,

    #[serde(rename = "area_construida", deserialize_with = "lenient_f64")]
    pub built_area: f64,
}

impl PropertyFields {
    /// Whether any of the listing's purposes matches `query`
    pub fn has_purpose(&self, query: &str) -> bool {
        let Some(wanted) = Purpose::parse(query) else {
            return false;
        };
        self.purpose
            .as_ref()
            .is_some_and(|purposes| purposes.contains(&wanted))
    }
}

/// A property listing from `imoveis.json`
///
/// Keeps the object exactly as stored next to its typed view. Serializing
/// writes the stored object back, so unknown keys, label spelling and number
/// formatting survive a read.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRecord {
    fields: PropertyFields,
    source: Map<String, Value>,
}

impl PropertyRecord {
    pub fn id(&self) -> i64 {
        self.fields.id
    }

    pub fn fields(&self) -> &PropertyFields {
        &self.fields
    }

    /// The stored object
    pub fn source(&self) -> &Map<String, Value> {
        &self.source
    }
}

impl From<PropertyFields> for PropertyRecord {
    fn from(fields: PropertyFields) -> Self {
        let source = match serde_json::to_value(&fields) {
            Ok(Value::Object(source)) => source,
            _ => Map::new(),
        };
        Self { fields, source }
    }
}

impl Serialize for PropertyRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.source.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PropertyRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let fields = PropertyFields::deserialize(&value).map_err(de::Error::custom)?;
        match value {
            Value::Object(source) => Ok(Self { fields, source }),
            other => Err(de::Error::custom(format!(
                "expected a listing object, found {}",
                other
            ))),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Accepts `null`, a single label, or a list of labels; unknown labels are skipped
fn purposes<'de, D>(deserializer: D) -> Result<Option<Vec<Purpose>>, D::Error>
where
    D: Deserializer<'de>,
{
    let labels = match Option::<OneOrMany>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(OneOrMany::One(label)) => vec![label],
        Some(OneOrMany::Many(labels)) => labels,
    };
    Ok(Some(
        labels.iter().filter_map(|label| Purpose::parse(label)).collect(),
    ))
}

fn known_status<'de, D>(deserializer: D) -> Result<Option<Status>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(|s| Status::parse(&s)))
}

/// Numbers in the listing files are sometimes stored as strings
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("expected a number, found '{}'", s))),
    }
}

/// A user from `usuarios.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,

    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "idade")]
    pub age: u32,
}

/// Payload of `POST /usuarios`, validated
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub age: u32,
}

impl NewUser {
    /// Validate a raw request body, reporting every invalid field at once
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let Some(object) = body.as_object() else {
            return Err(ValidationError::InvalidJson {
                message: "expected a JSON object".to_string(),
            });
        };

        let null = Value::Null;
        let name = object.get("nome").unwrap_or(&null);
        let age = object.get("idade").unwrap_or(&null);

        let checks: [(&str, &Value, &dyn Fn(&str, &Value) -> Result<(), String>); 4] = [
            ("nome", name, &required()),
            ("nome", name, &non_blank_string()),
            ("idade", age, &required()),
            ("idade", age, &integer_in_range(0, 150)),
        ];

        let mut errors: Vec<FieldValidationError> = Vec::new();
        for (field, value, check) in checks {
            if errors.iter().any(|e| e.field == field) {
                continue;
            }
            if let Err(message) = check(field, value) {
                errors.push(FieldValidationError {
                    field: field.to_string(),
                    message,
                });
            }
        }

        match (name.as_str(), age.as_u64()) {
            (Some(name), Some(age)) if errors.is_empty() => Ok(Self {
                name: name.trim().to_string(),
                age: age as u32,
            }),
            _ => Err(ValidationError::FieldErrors(errors)),
        }
    }

    /// Attach the id assigned by the user collection
    pub fn into_record(self, id: i64) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            age: self.age,
        }
    }
}

/// A favorited listing: any JSON object carrying an integer `id`
///
/// Every key other than `id` is kept exactly as the client sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteRecord {
    id: i64,
    fields: Map<String, Value>,
}

impl FavoriteRecord {
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The full payload, `id` included
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl TryFrom<Map<String, Value>> for FavoriteRecord {
    type Error = ValidationError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = match fields.get("id") {
            None | Some(Value::Null) => {
                return Err(ValidationError::MissingField {
                    field: "id".to_string(),
                });
            }
            Some(value) => value.as_i64().ok_or_else(|| ValidationError::FieldError {
                field: "id".to_string(),
                message: format!("must be an integer, found {}", value),
            })?,
        };
        Ok(Self { id, fields })
    }
}

impl TryFrom<Value> for FavoriteRecord {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => fields.try_into(),
            other => Err(ValidationError::InvalidJson {
                message: format!("expected a JSON object, found {}", other),
            }),
        }
    }
}

impl Serialize for FavoriteRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FavoriteRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::deserialize(deserializer)?;
        FavoriteRecord::try_from(fields).map_err(de::Error::custom)
    }
}
