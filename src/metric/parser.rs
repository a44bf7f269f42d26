//! Metric-list parser
//!
//! Entry format: `ID,TYPE,NAME,SPECIFIER` where the specifier may carry
//! commas of its own and an optional `DOMAIN:` prefix.

use super::mbean::{escape_spaces, resolve_attribute_key, EscapeStyle};
use super::MetricSpec;
use crate::error::SpecError;

/// Suffix some upstream lists append to an entry as a default-off marker
const OFF_MARKER: &str = ",0";

/// Parse a metric list and its enable mask
///
/// Entries keep the order of the list. Position `j` of the mask enables
/// entry `j` when it is exactly `"1"`; positions the mask does not cover
/// read as disabled.
///
/// Disabled entries are never retrieved, so they may be short or empty
/// (a trailing `;` for instance). Only enabled entries need the three
/// leading fields.
pub fn parse_metrics(
    list: &str,
    mask: &str,
    style: EscapeStyle,
) -> Result<Vec<MetricSpec>, SpecError> {
    let mask: Vec<&str> = mask.split(',').collect();

    list.split(';')
        .enumerate()
        .map(|(index, entry)| {
            let enabled = mask.get(index).is_some_and(|state| *state == "1");
            let mut spec = parse_fields(index, entry, style, enabled)?;
            spec.enabled = enabled;
            Ok(spec)
        })
        .collect()
}

/// Parse one entry of the metric list; the result is disabled
pub fn parse_entry(
    index: usize,
    entry: &str,
    style: EscapeStyle,
) -> Result<MetricSpec, SpecError> {
    parse_fields(index, entry, style, true)
}

fn parse_fields(
    index: usize,
    entry: &str,
    style: EscapeStyle,
    required: bool,
) -> Result<MetricSpec, SpecError> {
    let entry = entry.strip_suffix(OFF_MARKER).unwrap_or(entry);

    let mut fields = entry.split(',');
    let id = next_field(&mut fields, index, "id", required)?;
    let metric_type = next_field(&mut fields, index, "type", required)?;
    let name = next_field(&mut fields, index, "name", required)?;

    let specifier = fields.collect::<Vec<_>>().join(",").replace('"', "");

    let (domain, body) = match specifier.split_once(':') {
        Some((_, rest)) if rest.contains(':') => {
            return Err(SpecError::AmbiguousDomain {
                specifier: specifier.clone(),
            });
        }
        Some((domain, rest)) => (Some(domain.to_string()), rest.to_string()),
        None => (None, specifier.clone()),
    };

    let (mbean, attr_key) = match resolve_attribute_key(&body) {
        Some(attr) => (attr.mbean.to_string(), Some(attr.key.to_string())),
        None => (body, None),
    };

    Ok(MetricSpec {
        id,
        metric_type,
        name,
        domain,
        mbean: escape_spaces(&mbean, style),
        attr_key,
        enabled: false,
        value: String::new(),
    })
}

fn next_field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    index: usize,
    field: &'static str,
    required: bool,
) -> Result<String, SpecError> {
    match fields.next().filter(|value| !value.is_empty()) {
        Some(value) => Ok(value.to_string()),
        None if required => Err(SpecError::MissingField { index, field }),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BROKER: &str =
        "1127,4,m1,org.apache.activemq:brokerName=localhost,type=Broker AverageMessageSize,0";

    #[test]
    fn test_parse_entry_with_domain_and_off_marker() {
        let spec = parse_entry(0, BROKER, EscapeStyle::Single).unwrap();
        assert_eq!(spec.id, "1127");
        assert_eq!(spec.metric_type, "4");
        assert_eq!(spec.name, "m1");
        assert_eq!(spec.domain.as_deref(), Some("org.apache.activemq"));
        assert_eq!(spec.mbean, "brokerName=localhost,type=Broker AverageMessageSize");
        assert_eq!(spec.attr_key, None);
        assert!(spec.value.is_empty());
    }

    #[test]
    fn test_leading_fields_ignore_extra_commas() {
        let spec =
            parse_entry(0, "7,2,threads,a=1,b=2,c=3 Count", EscapeStyle::Single).unwrap();
        assert_eq!(spec.id, "7");
        assert_eq!(spec.metric_type, "2");
        assert_eq!(spec.name, "threads");
        assert_eq!(spec.domain, None);
        assert_eq!(spec.mbean, "a=1,b=2,c=3 Count");
    }

    #[test]
    fn test_composite_key_and_escaping() {
        let spec = parse_entry(
            0,
            "3,4,young,java.lang:type=GarbageCollector,name=PS Scavenge LastGcInfo.duration",
            EscapeStyle::Double,
        )
        .unwrap();
        assert_eq!(spec.domain.as_deref(), Some("java.lang"));
        assert_eq!(spec.attr_key.as_deref(), Some("duration"));
        assert_eq!(
            spec.mbean,
            "type=GarbageCollector,name=PS\\\\ Scavenge LastGcInfo"
        );
    }

    #[test]
    fn test_quotes_are_stripped_from_specifier() {
        let entry = "1,4,m,\"java.lang:type=Memory HeapMemoryUsage.used\"";
        let spec = parse_entry(0, entry, EscapeStyle::Single).unwrap();
        assert_eq!(spec.domain.as_deref(), Some("java.lang"));
        assert_eq!(spec.mbean, "type=Memory HeapMemoryUsage");
        assert_eq!(spec.attr_key.as_deref(), Some("used"));
    }

    #[test]
    fn test_ambiguous_domain() {
        let err = parse_entry(0, "1,4,m,a:b:c Attr", EscapeStyle::Single).unwrap_err();
        assert_eq!(
            err,
            SpecError::AmbiguousDomain {
                specifier: "a:b:c Attr".to_string()
            }
        );
    }

    #[test]
    fn test_missing_leading_field() {
        assert_eq!(
            parse_entry(2, "1,4", EscapeStyle::Single).unwrap_err(),
            SpecError::MissingField {
                index: 2,
                field: "name"
            }
        );
        assert_eq!(
            parse_entry(0, "", EscapeStyle::Single).unwrap_err(),
            SpecError::MissingField {
                index: 0,
                field: "id"
            }
        );
    }

    #[test]
    fn test_enable_mask() {
        let list = "1,4,a,x:type=A Value;2,4,b,x:type=B Value;3,4,c,x:type=C Value";
        let metrics = parse_metrics(list, "1,0,1", EscapeStyle::Single).unwrap();
        let enabled: Vec<bool> = metrics.iter().map(|m| m.enabled).collect();
        assert_eq!(enabled, vec![true, false, true]);
        let ids: Vec<&str> = metrics.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_short_mask_disables_remaining() {
        let list = "1,4,a,x:type=A Value;2,4,b,x:type=B Value";
        let metrics = parse_metrics(list, "1", EscapeStyle::Single).unwrap();
        assert!(metrics[0].enabled);
        assert!(!metrics[1].enabled);
    }

    #[test]
    fn test_trailing_separator_is_ignored_when_disabled() {
        let metrics = parse_metrics("1,4,m,x:type=A Value;", "1", EscapeStyle::Single).unwrap();
        assert_eq!(metrics.len(), 2);
        assert!(metrics[0].enabled);
        assert_eq!(metrics[0].id, "1");
        assert!(!metrics[1].enabled);
        assert!(metrics[1].id.is_empty());
    }

    #[test]
    fn test_short_disabled_entry_is_kept() {
        let metrics =
            parse_metrics("1,4,m,x:type=A Value;9,4", "1,0", EscapeStyle::Single).unwrap();
        assert_eq!(metrics.len(), 2);
        assert!(metrics[0].enabled);
        assert!(!metrics[1].enabled);
        assert_eq!(metrics[1].id, "9");
        assert_eq!(metrics[1].metric_type, "4");
        assert!(metrics[1].name.is_empty());
    }

    #[test]
    fn test_short_enabled_entry_fails() {
        assert_eq!(
            parse_metrics("1,4,m,x:type=A Value;9,4", "1,1", EscapeStyle::Single).unwrap_err(),
            SpecError::MissingField {
                index: 1,
                field: "name"
            }
        );
    }

    #[test]
    fn test_disabled_entry_with_ambiguous_domain_still_fails() {
        assert!(matches!(
            parse_metrics("1,4,m,x:type=A Value;2,4,n,a:b:c Attr", "1,0", EscapeStyle::Single),
            Err(SpecError::AmbiguousDomain { .. })
        ));
    }

    #[test]
    fn test_mask_value_must_be_exactly_one() {
        let metrics = parse_metrics("1,4,a,x:type=A Value", " 1", EscapeStyle::Single).unwrap();
        assert!(!metrics[0].enabled);
    }
}
