use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ExtractError;
use crate::page::{Page, PageLayout};

/// Daily price history for one stock, as embedded in the detail page.
///
/// `dates`, `prices` and `volumes` are positionally aligned: index `i` of each
/// describes the same trading session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StockSeries {
    pub symbol: String,
    pub name: String,
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl StockSeries {
    /// Parses and validates a serialized record.
    ///
    /// `prices` and `dates` must be present and non-null. A missing `volumes`
    /// is accepted and yields an empty volume series.
    pub fn from_payload(payload: &str) -> Result<Self, ExtractError> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| ExtractError::MalformedPayload(e.to_string()))?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self, ExtractError> {
        // Any parsed value other than an object has no series to read.
        let Value::Object(fields) = value else {
            return Err(ExtractError::IncompleteData("prices"));
        };

        let prices = series_field(&fields, "prices")?
            .ok_or(ExtractError::IncompleteData("prices"))?;
        let dates = series_field(&fields, "dates")?
            .ok_or(ExtractError::IncompleteData("dates"))?;
        let volumes = series_field(&fields, "volumes")?.unwrap_or_default();

        Ok(Self {
            symbol: text_field(&fields, "symbol")?,
            name: text_field(&fields, "name")?,
            dates,
            prices,
            volumes,
        })
    }

    /// Serializes the record the way the page template embeds it.
    ///
    /// Non-finite prices or volumes are written as `null`, which
    /// [`from_payload`](Self::from_payload) rejects.
    pub fn to_payload(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// True when prices (and volumes, if any) line up with the dates.
    pub fn is_aligned(&self) -> bool {
        self.prices.len() == self.dates.len()
            && (self.volumes.is_empty() || self.volumes.len() == self.dates.len())
    }
}

/// Reads the stock record from the holder element of `page`.
pub fn extract<P: Page + ?Sized>(page: &P, layout: &PageLayout) -> Result<StockSeries, ExtractError> {
    let holder = page
        .element(&layout.holder_id)
        .ok_or_else(|| ExtractError::MissingContainer(layout.holder_id.clone()))?;

    let payload = holder.attribute(&layout.payload_attr).ok_or_else(|| {
        ExtractError::MalformedPayload(format!(
            "attribute `{}` missing on `{}`",
            layout.payload_attr, layout.holder_id
        ))
    })?;

    let series = StockSeries::from_payload(payload)?;
    if !series.is_aligned() {
        log::warn!(
            "{}: series lengths differ (dates={}, prices={}, volumes={})",
            series.symbol,
            series.dates.len(),
            series.prices.len(),
            series.volumes.len()
        );
    }
    Ok(series)
}

/// `Ok(None)` when the field is absent or null.
fn series_field<T>(fields: &Map<String, Value>, name: &'static str) -> Result<Option<Vec<T>>, ExtractError>
where
    T: serde::de::DeserializeOwned,
{
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Vec::<T>::deserialize(value)
            .map(Some)
            .map_err(|e| ExtractError::MalformedPayload(format!("`{name}`: {e}"))),
    }
}

// Numeric tickers (e.g. 600519) are common, so numbers are accepted as text.
fn text_field(fields: &Map<String, Value>, name: &'static str) -> Result<String, ExtractError> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(ExtractError::MalformedPayload(format!(
            "`{name}`: expected a string, found {}",
            value_kind(other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Element, StaticPage};

    const ABC: &str = r#"{"symbol":"ABC","name":"ABC Inc","dates":["d1","d2"],"prices":[10,12],"volumes":[100,200]}"#;

    fn page_with(payload: &str) -> StaticPage {
        StaticPage::new().with_element(Element::new("stock-data").with_attribute("data-stock", payload))
    }

    #[test]
    fn parses_complete_record() {
        let series = StockSeries::from_payload(ABC).unwrap();
        assert_eq!(series.symbol, "ABC");
        assert_eq!(series.name, "ABC Inc");
        assert_eq!(series.dates, vec!["d1", "d2"]);
        assert_eq!(series.prices, vec![10.0, 12.0]);
        assert_eq!(series.volumes, vec![100.0, 200.0]);
        assert!(series.is_aligned());
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn missing_prices_is_incomplete() {
        let err = StockSeries::from_payload(r#"{"symbol":"ABC","dates":["d1"]}"#).unwrap_err();
        assert_eq!(err, ExtractError::IncompleteData("prices"));
    }

    #[test]
    fn missing_dates_is_incomplete() {
        let err = StockSeries::from_payload(r#"{"prices":[1.0],"dates":null}"#).unwrap_err();
        assert_eq!(err, ExtractError::IncompleteData("dates"));
    }

    #[test]
    fn non_object_payloads_are_incomplete() {
        for payload in ["null", "[1, 2, 3]", "42", r#""ABC""#, "false"] {
            let err = StockSeries::from_payload(payload).unwrap_err();
            assert_eq!(err, ExtractError::IncompleteData("prices"), "{payload}");
        }
    }

    #[test]
    fn missing_volumes_gives_empty_series() {
        let series = StockSeries::from_payload(r#"{"symbol":"X","dates":["a"],"prices":[1]}"#).unwrap();
        assert!(series.volumes.is_empty());
        assert!(series.is_aligned());
    }

    #[test]
    fn unparseable_payload_is_malformed() {
        let err = StockSeries::from_payload("{symbol: ABC").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedPayload(_)));
    }

    #[test]
    fn wrong_shapes_are_malformed() {
        for payload in [
            r#"{"dates":["a"],"prices":"12"}"#,
            r#"{"dates":["a"],"prices":[1],"volumes":[true]}"#,
            r#"{"dates":["a"],"prices":[1],"symbol":["ABC"]}"#,
        ] {
            let err = StockSeries::from_payload(payload).unwrap_err();
            assert!(matches!(err, ExtractError::MalformedPayload(_)), "{payload}: {err:?}");
        }
    }

    #[test]
    fn numeric_symbol_is_accepted() {
        let series = StockSeries::from_payload(r#"{"symbol":600519,"dates":[],"prices":[]}"#).unwrap();
        assert_eq!(series.symbol, "600519");
        assert_eq!(series.name, "");
        assert!(series.is_empty());
    }

    #[test]
    fn misaligned_series_still_extracts() {
        let page = page_with(r#"{"dates":["a","b"],"prices":[1],"volumes":[1,2,3]}"#);
        let series = extract(&page, &PageLayout::default()).unwrap();
        assert!(!series.is_aligned());
    }

    #[test]
    fn extract_requires_holder() {
        let page = StaticPage::new().with_element(Element::new("priceChart"));
        let err = extract(&page, &PageLayout::default()).unwrap_err();
        assert_eq!(err, ExtractError::MissingContainer("stock-data".to_string()));
    }

    #[test]
    fn extract_requires_payload_attribute() {
        let page = StaticPage::new().with_element(Element::new("stock-data"));
        let err = extract(&page, &PageLayout::default()).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedPayload(_)));
    }

    #[test]
    fn payload_round_trips_through_page() {
        let original = StockSeries::from_payload(ABC).unwrap();
        let page = page_with(&original.to_payload().unwrap());
        assert_eq!(extract(&page, &PageLayout::default()).unwrap(), original);
    }

    #[test]
    fn non_finite_values_do_not_survive_payload() {
        let series = StockSeries {
            dates: vec!["d1".into()],
            prices: vec![f64::NAN],
            ..StockSeries::default()
        };
        let payload = series.to_payload().unwrap();
        assert!(payload.contains("null"));
        assert!(matches!(
            StockSeries::from_payload(&payload),
            Err(ExtractError::MalformedPayload(_))
        ));
    }
}
