use crate::error::{Result, VaultError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// The storage type behind a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Flag,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Flag => "yes/no",
        };
        write!(f, "{}", name)
    }
}

/// Every field a coin record carries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Field {
    UniqueId,
    IssuingCountry,
    MintYear,
    CoinType,
    CirculationYears,
    Value,
    FaceValue,
    CurrencyUnit,
    Composition,
    Weight,
    Diameter,
    Thickness,
    Orientation,
    Demonetized,
    Edge,
    MintMark,
    PrintRun,
    PrintRunNote,
    Quantity,
    Condition,
    ImportantNote,
    ObverseImagePath,
    ReverseImagePath,
    FlagImagePath,
    ShieldImagePath,
}

impl Field {
    pub const ALL: [Field; 25] = [
        Field::UniqueId,
        Field::IssuingCountry,
        Field::MintYear,
        Field::CoinType,
        Field::CirculationYears,
        Field::Value,
        Field::FaceValue,
        Field::CurrencyUnit,
        Field::Composition,
        Field::Weight,
        Field::Diameter,
        Field::Thickness,
        Field::Orientation,
        Field::Demonetized,
        Field::Edge,
        Field::MintMark,
        Field::PrintRun,
        Field::PrintRunNote,
        Field::Quantity,
        Field::Condition,
        Field::ImportantNote,
        Field::ObverseImagePath,
        Field::ReverseImagePath,
        Field::FlagImagePath,
        Field::ShieldImagePath,
    ];

    /// The JSON key this field is persisted under.
    pub fn key(self) -> &'static str {
        match self {
            Field::UniqueId => "unique_id",
            Field::IssuingCountry => "issuing_country",
            Field::MintYear => "mint_year",
            Field::CoinType => "type",
            Field::CirculationYears => "circulation_years",
            Field::Value => "value",
            Field::FaceValue => "face_value",
            Field::CurrencyUnit => "currency_unit",
            Field::Composition => "composition",
            Field::Weight => "weight",
            Field::Diameter => "diameter",
            Field::Thickness => "thickness",
            Field::Orientation => "orientation",
            Field::Demonetized => "demonetized",
            Field::Edge => "edge",
            Field::MintMark => "mint_mark",
            Field::PrintRun => "print_run",
            Field::PrintRunNote => "print_run_note",
            Field::Quantity => "quantity",
            Field::Condition => "condition",
            Field::ImportantNote => "important_note",
            Field::ObverseImagePath => "obverse_image_path",
            Field::ReverseImagePath => "reverse_image_path",
            Field::FlagImagePath => "flag_image_path",
            Field::ShieldImagePath => "shield_image_path",
        }
    }

    /// Key used by collection files written before the English schema.
    pub fn legacy_key(self) -> Option<&'static str> {
        let key = match self {
            Field::UniqueId => "codigo_unico",
            Field::IssuingCountry => "pais_emisor",
            Field::MintYear => "ano_acunacion",
            Field::CoinType => "tipo",
            Field::CirculationYears => "anos_de_emision",
            Field::Value => "valor",
            Field::FaceValue => "valor_nominal",
            Field::CurrencyUnit => "unidad_monetaria",
            Field::Composition => "composicion",
            Field::Weight => "peso",
            Field::Diameter => "diametro",
            Field::Thickness => "grosor",
            Field::Orientation => "orientacion",
            Field::Demonetized => "desmonetizada",
            Field::Edge => "canto",
            Field::MintMark => "ceca",
            Field::PrintRun => "tirada",
            Field::PrintRunNote => return None,
            Field::Quantity => "cantidad",
            Field::Condition => "estado",
            Field::ImportantNote => "nota_importante",
            Field::ObverseImagePath => "foto_anverso",
            Field::ReverseImagePath => "foto_reverso",
            Field::FlagImagePath => "foto_bandera",
            Field::ShieldImagePath => "foto_escudo",
        };
        Some(key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::UniqueId => "Unique ID",
            Field::IssuingCountry => "Issuing country",
            Field::MintYear => "Mint year",
            Field::CoinType => "Type",
            Field::CirculationYears => "Circulation years",
            Field::Value => "Value",
            Field::FaceValue => "Face value",
            Field::CurrencyUnit => "Currency unit",
            Field::Composition => "Composition",
            Field::Weight => "Weight",
            Field::Diameter => "Diameter",
            Field::Thickness => "Thickness",
            Field::Orientation => "Orientation",
            Field::Demonetized => "Demonetized",
            Field::Edge => "Edge",
            Field::MintMark => "Mint mark",
            Field::PrintRun => "Print run",
            Field::PrintRunNote => "Print run note",
            Field::Quantity => "Quantity",
            Field::Condition => "Condition",
            Field::ImportantNote => "Important note",
            Field::ObverseImagePath => "Obverse image",
            Field::ReverseImagePath => "Reverse image",
            Field::FlagImagePath => "Flag image",
            Field::ShieldImagePath => "Shield image",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::MintYear | Field::PrintRun | Field::Quantity => FieldKind::Integer,
            Field::Weight | Field::Diameter | Field::Thickness => FieldKind::Decimal,
            Field::Demonetized => FieldKind::Flag,
            _ => FieldKind::Text,
        }
    }

    /// Convert user-entered text into a typed value for this field.
    ///
    /// Blank input means "no value". Decimal fields accept the European
    /// notation (`1.234,56`) as well as plain `1234.56`; print runs accept
    /// thousand separators.
    pub fn parse_value(self, input: &str) -> Result<FieldValue> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(match self.kind() {
                FieldKind::Flag => FieldValue::Flag(false),
                _ => FieldValue::Null,
            });
        }

        match self {
            Field::MintYear => parse_digits(self, text),
            Field::PrintRun => {
                let cleaned: String = text.chars().filter(|c| *c != '.' && *c != ',').collect();
                parse_digits(self, &cleaned)
            }
            Field::Quantity => match text.parse::<i64>() {
                Ok(n) if n >= 1 => Ok(FieldValue::Integer(n)),
                _ => Err(VaultError::Validation(format!(
                    "{} must be a whole number of at least 1, got '{}'",
                    self.label(),
                    text
                ))),
            },
            _ => match self.kind() {
                FieldKind::Decimal => parse_decimal(self, text),
                FieldKind::Flag => parse_flag(self, text),
                _ => Ok(FieldValue::Text(text.to_string())),
            },
        }
    }
}

fn parse_digits(field: Field, text: &str) -> Result<FieldValue> {
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = text.parse::<i64>() {
            return Ok(FieldValue::Integer(n));
        }
    }
    Err(VaultError::Validation(format!(
        "{} must be a whole number, got '{}'",
        field.label(),
        text
    )))
}

fn parse_decimal(field: Field, text: &str) -> Result<FieldValue> {
    let normalized = if text.contains(',') {
        text.replace('.', "").replace(',', ".")
    } else {
        text.to_string()
    };
    match normalized.parse::<f64>() {
        Ok(d) if d.is_finite() => Ok(FieldValue::Decimal(d)),
        _ => Err(VaultError::Validation(format!(
            "{} must be a number (e.g. 12,34 or 1.234,56), got '{}'",
            field.label(),
            text
        ))),
    }
}

fn parse_flag(field: Field, text: &str) -> Result<FieldValue> {
    match text.to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "si" | "sí" => Ok(FieldValue::Flag(true)),
        "no" | "n" | "false" | "0" => Ok(FieldValue::Flag(false)),
        _ => Err(VaultError::Validation(format!(
            "{} must be yes or no, got '{}'",
            field.label(),
            text
        ))),
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Field {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "country" => return Ok(Field::IssuingCountry),
            "year" => return Ok(Field::MintYear),
            "coin_type" => return Ok(Field::CoinType),
            _ => {}
        }
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.key() == normalized || f.legacy_key() == Some(normalized.as_str()))
            .ok_or_else(|| VaultError::UnknownField(s.to_string()))
    }
}

impl From<Field> for &'static str {
    fn from(field: Field) -> Self {
        field.key()
    }
}

impl TryFrom<String> for Field {
    type Error = VaultError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// A single typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Decimal(f64),
    Flag(bool),
}

impl FieldValue {
    /// The string form matched by searches and used as a grouping key.
    pub fn search_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Decimal(d) if d.is_finite() && d.fract() == 0.0 => format!("{:.1}", d),
            FieldValue::Decimal(d) => d.to_string(),
            FieldValue::Flag(b) => b.to_string(),
        }
    }

    /// Whether the value counts as filled in: null, empty text, zero and
    /// `false` do not.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Integer(n) => *n != 0,
            FieldValue::Decimal(d) => *d != 0.0,
            FieldValue::Flag(b) => *b,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Text(_) => "text",
            FieldValue::Integer(_) => "integer",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::Flag(_) => "yes/no",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.search_text())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<f64> for FieldValue {
    fn from(d: f64) -> Self {
        FieldValue::Decimal(d)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// An ordered set of field assignments, used both for new coins and for
/// partial updates. Assigning a field twice keeps the latest value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    entries: Vec<(Field, FieldValue)>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.entries.iter().find(|(f, _)| *f == field).map(|(_, v)| v)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Field, FieldValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Field, FieldValue)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (Field, FieldValue)>>(iter: I) -> Self {
        let mut values = FieldValues::new();
        for (field, value) in iter {
            values.set(field, value);
        }
        values
    }
}

/// A catalogued coin. Serializes every field, absent ones as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    #[serde(alias = "codigo_unico")]
    pub unique_id: String,
    #[serde(alias = "pais_emisor")]
    pub issuing_country: Option<String>,
    #[serde(alias = "ano_acunacion")]
    pub mint_year: Option<i64>,
    #[serde(rename = "type", alias = "tipo")]
    pub coin_type: Option<String>,
    #[serde(alias = "anos_de_emision")]
    pub circulation_years: Option<String>,
    #[serde(alias = "valor", default, deserialize_with = "lenient_text")]
    pub value: Option<String>,
    #[serde(alias = "valor_nominal", default, deserialize_with = "lenient_text")]
    pub face_value: Option<String>,
    #[serde(alias = "unidad_monetaria")]
    pub currency_unit: Option<String>,
    #[serde(alias = "composicion")]
    pub composition: Option<String>,
    #[serde(alias = "peso")]
    pub weight: Option<f64>,
    #[serde(alias = "diametro")]
    pub diameter: Option<f64>,
    #[serde(alias = "grosor")]
    pub thickness: Option<f64>,
    #[serde(alias = "orientacion")]
    pub orientation: Option<String>,
    #[serde(alias = "desmonetizada", default, deserialize_with = "null_as_false")]
    pub demonetized: bool,
    #[serde(alias = "canto")]
    pub edge: Option<String>,
    #[serde(alias = "ceca")]
    pub mint_mark: Option<String>,
    #[serde(alias = "tirada")]
    pub print_run: Option<i64>,
    pub print_run_note: Option<String>,
    #[serde(alias = "cantidad")]
    pub quantity: Option<i64>,
    #[serde(alias = "estado")]
    pub condition: Option<String>,
    #[serde(alias = "nota_importante")]
    pub important_note: Option<String>,
    #[serde(alias = "foto_anverso")]
    pub obverse_image_path: Option<String>,
    #[serde(alias = "foto_reverso")]
    pub reverse_image_path: Option<String>,
    #[serde(alias = "foto_bandera")]
    pub flag_image_path: Option<String>,
    #[serde(alias = "foto_escudo")]
    pub shield_image_path: Option<String>,
}

impl Coin {
    /// Build a record from caller-supplied values. Every field not supplied
    /// stays empty; a supplied `unique_id` is ignored.
    pub fn from_values(unique_id: String, values: &FieldValues) -> Result<Self> {
        let mut coin = Coin {
            unique_id,
            ..Default::default()
        };
        for (field, value) in values.iter() {
            if *field == Field::UniqueId {
                continue;
            }
            coin.set(*field, value.clone())?;
        }
        Ok(coin)
    }

    /// Number of physical pieces this record stands for.
    pub fn pieces(&self) -> u64 {
        match self.quantity {
            Some(q) if q >= 1 => q as u64,
            _ => 1,
        }
    }

    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::UniqueId => FieldValue::Text(self.unique_id.clone()),
            Field::IssuingCountry => self.issuing_country.clone().into(),
            Field::MintYear => self.mint_year.into(),
            Field::CoinType => self.coin_type.clone().into(),
            Field::CirculationYears => self.circulation_years.clone().into(),
            Field::Value => self.value.clone().into(),
            Field::FaceValue => self.face_value.clone().into(),
            Field::CurrencyUnit => self.currency_unit.clone().into(),
            Field::Composition => self.composition.clone().into(),
            Field::Weight => self.weight.into(),
            Field::Diameter => self.diameter.into(),
            Field::Thickness => self.thickness.into(),
            Field::Orientation => self.orientation.clone().into(),
            Field::Demonetized => FieldValue::Flag(self.demonetized),
            Field::Edge => self.edge.clone().into(),
            Field::MintMark => self.mint_mark.clone().into(),
            Field::PrintRun => self.print_run.into(),
            Field::PrintRunNote => self.print_run_note.clone().into(),
            Field::Quantity => self.quantity.into(),
            Field::Condition => self.condition.clone().into(),
            Field::ImportantNote => self.important_note.clone().into(),
            Field::ObverseImagePath => self.obverse_image_path.clone().into(),
            Field::ReverseImagePath => self.reverse_image_path.clone().into(),
            Field::FlagImagePath => self.flag_image_path.clone().into(),
            Field::ShieldImagePath => self.shield_image_path.clone().into(),
        }
    }

    /// Overwrite one field. The identifier cannot be set this way.
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<()> {
        match field {
            Field::UniqueId => {
                return Err(VaultError::Validation(
                    "unique_id is assigned by the store and cannot be changed".to_string(),
                ))
            }
            Field::IssuingCountry => self.issuing_country = text(field, value)?,
            Field::MintYear => self.mint_year = integer(field, value)?,
            Field::CoinType => self.coin_type = text(field, value)?,
            Field::CirculationYears => self.circulation_years = text(field, value)?,
            Field::Value => self.value = text(field, value)?,
            Field::FaceValue => self.face_value = text(field, value)?,
            Field::CurrencyUnit => self.currency_unit = text(field, value)?,
            Field::Composition => self.composition = text(field, value)?,
            Field::Weight => self.weight = decimal(field, value)?,
            Field::Diameter => self.diameter = decimal(field, value)?,
            Field::Thickness => self.thickness = decimal(field, value)?,
            Field::Orientation => self.orientation = text(field, value)?,
            Field::Demonetized => self.demonetized = flag(field, value)?,
            Field::Edge => self.edge = text(field, value)?,
            Field::MintMark => self.mint_mark = text(field, value)?,
            Field::PrintRun => self.print_run = integer(field, value)?,
            Field::PrintRunNote => self.print_run_note = text(field, value)?,
            Field::Quantity => {
                let quantity = integer(field, value)?;
                if matches!(quantity, Some(q) if q < 1) {
                    return Err(VaultError::Validation(
                        "quantity must be at least 1".to_string(),
                    ));
                }
                self.quantity = quantity;
            }
            Field::Condition => self.condition = text(field, value)?,
            Field::ImportantNote => self.important_note = text(field, value)?,
            Field::ObverseImagePath => self.obverse_image_path = text(field, value)?,
            Field::ReverseImagePath => self.reverse_image_path = text(field, value)?,
            Field::FlagImagePath => self.flag_image_path = text(field, value)?,
            Field::ShieldImagePath => self.shield_image_path = text(field, value)?,
        }
        Ok(())
    }
}

fn mismatch(field: Field, value: &FieldValue) -> VaultError {
    VaultError::Validation(format!(
        "{} expects a {} value, got {}",
        field.key(),
        field.kind(),
        value.kind_name()
    ))
}

fn text(field: Field, value: FieldValue) -> Result<Option<String>> {
    match value {
        FieldValue::Null => Ok(None),
        FieldValue::Text(s) => Ok(Some(s)),
        other => Err(mismatch(field, &other)),
    }
}

fn integer(field: Field, value: FieldValue) -> Result<Option<i64>> {
    match value {
        FieldValue::Null => Ok(None),
        FieldValue::Integer(n) => Ok(Some(n)),
        // Numeric strings are accepted, as the year field historically was text
        FieldValue::Text(s) if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => s
            .parse()
            .map(Some)
            .map_err(|_| VaultError::Validation(format!("{} is out of range: {}", field, s))),
        other => Err(mismatch(field, &other)),
    }
}

fn decimal(field: Field, value: FieldValue) -> Result<Option<f64>> {
    match value {
        FieldValue::Null => Ok(None),
        // JSON has no NaN or infinity
        FieldValue::Decimal(d) if !d.is_finite() => Err(VaultError::Validation(format!(
            "{} must be a finite number, got {}",
            field.key(),
            d
        ))),
        FieldValue::Decimal(d) => Ok(Some(d)),
        FieldValue::Integer(n) => Ok(Some(n as f64)),
        other => Err(mismatch(field, &other)),
    }
}

fn flag(field: Field, value: FieldValue) -> Result<bool> {
    match value {
        FieldValue::Null => Ok(false),
        FieldValue::Flag(b) => Ok(b),
        other => Err(mismatch(field, &other)),
    }
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Older files stored monetary values as numbers.
fn lenient_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
