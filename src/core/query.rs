//! Query parameters, property filters and pagination

use crate::core::error::ValidationError;
use crate::core::record::PropertyRecord;
use serde::Deserialize;

/// Default page size when `limit` is absent
pub const DEFAULT_LIMIT: usize = 100;

/// Raw query string of `GET /imoveis`
///
/// Every parameter is kept as text so that a bad number surfaces as a
/// [`ValidationError`] naming the parameter rather than as an extractor
/// rejection. Empty values count as absent: the mobile client sends
/// `finalidade=&tipo=` for filters the user left blank.
///
/// # Example
/// ```text
/// GET /imoveis?tipo=casa&bairro=Centro&area_t_min=200&skip=0&limit=20
/// GET /imoveis?finalidade=alugar&preco_l_max=2500
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PropertyQuery {
    /// Number of filtered items to skip
    pub skip: Option<String>,

    /// Alias of `skip` used by the mobile client; `skip` wins when both are set
    pub offset: Option<String>,

    /// Maximum number of items returned
    pub limit: Option<String>,

    pub finalidade: Option<String>,
    pub tipo: Option<String>,
    pub bairro: Option<String>,

    pub area_t_min: Option<String>,
    pub area_t_max: Option<String>,
    pub area_c_min: Option<String>,
    pub area_c_max: Option<String>,

    pub preco_v_min: Option<String>,
    pub preco_v_max: Option<String>,
    pub preco_l_min: Option<String>,
    pub preco_l_max: Option<String>,
}

impl PropertyQuery {
    /// Parse the raw parameters into a filter and a page window
    pub fn parse(&self, default_limit: usize) -> Result<ParsedQuery<'_>, ValidationError> {
        let filter = PropertyFilter {
            purpose: text(&self.finalidade),
            kind: text(&self.tipo),
            neighborhood: text(&self.bairro),
            lot_area: NumericRange::parse(
                ("area_t_min", &self.area_t_min),
                ("area_t_max", &self.area_t_max),
            )?,
            built_area: NumericRange::parse(
                ("area_c_min", &self.area_c_min),
                ("area_c_max", &self.area_c_max),
            )?,
            sale_price: NumericRange::parse(
                ("preco_v_min", &self.preco_v_min),
                ("preco_v_max", &self.preco_v_max),
            )?,
            rent_price: NumericRange::parse(
                ("preco_l_min", &self.preco_l_min),
                ("preco_l_max", &self.preco_l_max),
            )?,
        };

        let skip = match text(&self.skip) {
            Some(skip) => Some(count("skip", skip)?),
            None => text(&self.offset)
                .map(|offset| count("offset", offset))
                .transpose()?,
        };
        let limit = text(&self.limit)
            .map(|limit| count("limit", limit))
            .transpose()?;

        Ok(ParsedQuery {
            filter,
            page: Page {
                skip: skip.unwrap_or(0),
                limit: limit.unwrap_or(default_limit),
            },
        })
    }
}

/// Trimmed parameter value, `None` when absent or blank
fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn number(name: &str, value: &str) -> Result<f64, ValidationError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| !n.is_nan())
        .ok_or_else(|| ValidationError::InvalidNumber {
            parameter: name.to_string(),
            value: value.to_string(),
        })
}

fn count(name: &str, value: &str) -> Result<usize, ValidationError> {
    value
        .parse::<usize>()
        .map_err(|_| ValidationError::FieldError {
            field: name.to_string(),
            message: format!("must be a non-negative integer (found: {})", value),
        })
}

/// Inclusive numeric range; an absent bound is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    fn parse(
        (min_name, min): (&str, &Option<String>),
        (max_name, max): (&str, &Option<String>),
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            min: text(min).map(|v| number(min_name, v)).transpose()?,
            max: text(max).map(|v| number(max_name, v)).transpose()?,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Conjunction of the optional property predicates
///
/// Text predicates compare case-insensitively and exactly; numeric ones are
/// inclusive ranges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter<'q> {
    pub purpose: Option<&'q str>,
    pub kind: Option<&'q str>,
    pub neighborhood: Option<&'q str>,
    pub lot_area: NumericRange,
    pub built_area: NumericRange,
    pub sale_price: NumericRange,
    pub rent_price: NumericRange,
}

impl PropertyFilter<'_> {
    pub fn matches(&self, record: &PropertyRecord) -> bool {
        let fields = record.fields();
        self.purpose.is_none_or(|p| fields.has_purpose(p))
            && self.kind.is_none_or(|k| eq_ignore_case(&fields.kind, k))
            && self
                .neighborhood
                .is_none_or(|n| eq_ignore_case(&fields.neighborhood, n))
            && self.lot_area.contains(fields.lot_area)
            && self.built_area.contains(fields.built_area)
            && self.sale_price.contains(fields.sale_price)
            && self.rent_price.contains(fields.rent_price)
    }
}

fn eq_ignore_case(field: &str, wanted: &str) -> bool {
    field.trim().to_lowercase() == wanted.to_lowercase()
}

/// Contiguous window `[skip, skip + limit)` over a filtered sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Page {
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items.into_iter().skip(self.skip).take(self.limit).collect()
    }
}

/// A validated `GET /imoveis` query
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery<'q> {
    pub filter: PropertyFilter<'q>,
    pub page: Page,
}

impl ParsedQuery<'_> {
    /// Filter, then paginate, keeping the original relative order
    pub fn apply(&self, records: Vec<PropertyRecord>) -> Vec<PropertyRecord> {
        self.page
            .apply(records.into_iter().filter(|r| self.filter.matches(r)))
    }
}
