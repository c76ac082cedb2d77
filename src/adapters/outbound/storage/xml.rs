use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::domain::{
    errors::{StorageClientError, StorageClientResult},
    models::{LifecycleConfiguration, LifecycleRule, RuleStatus},
    value_objects::BucketName,
};

fn xml_error(context: &str, e: impl std::fmt::Display) -> StorageClientError {
    StorageClientError::Xml(format!("{}: {}", context, e))
}

// Text content of the element whose start tag was just read. An element with
// no text yields an empty string.
fn read_text(reader: &mut Reader<&[u8]>, buf: &mut Vec<u8>) -> StorageClientResult<String> {
    buf.clear();
    match reader.read_event_into(buf) {
        Ok(Event::Text(e)) => e
            .unescape()
            .map(|text| text.into_owned())
            .map_err(|e| xml_error("Failed to unescape XML text", e)),
        Ok(Event::End(_)) => Ok(String::new()),
        Ok(_) => Err(StorageClientError::Xml("Expected text content".to_string())),
        Err(e) => Err(xml_error("Error parsing XML", e)),
    }
}

fn parse_date(text: &str) -> StorageClientResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| xml_error("Failed to parse date", e))
}

/// Decode a `GET ?lifecycle` response body.
///
/// Both the legacy rule-level `<Prefix>` and `<Filter><Prefix>` (optionally
/// inside `<And>`) set the rule prefix.
pub(crate) fn parse_lifecycle_configuration(
    bucket: &BucketName,
    xml: &str,
) -> StorageClientResult<LifecycleConfiguration> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut config = LifecycleConfiguration::new(bucket.clone());
    let mut buf = Vec::new();
    let mut text_buf = Vec::new();

    let mut current_rule: Option<LifecycleRule> = None;
    let mut in_expiration = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| xml_error("Error parsing XML", e))?;

        match event {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                match name.as_slice() {
                    b"Rule" => current_rule = Some(LifecycleRule::default()),
                    b"Expiration" => in_expiration = true,
                    b"ID" | b"Status" | b"Prefix" | b"Days" | b"Date" => {
                        let text = read_text(&mut reader, &mut text_buf)?;
                        if let Some(rule) = current_rule.as_mut() {
                            apply_rule_field(rule, &name, text, in_expiration)?;
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if e.name().as_ref() == b"Prefix" {
                    if let Some(rule) = current_rule.as_mut() {
                        rule.prefix = Some(String::new());
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"Rule" => {
                    if let Some(rule) = current_rule.take() {
                        config.rules.push(rule);
                    }
                }
                b"Expiration" => in_expiration = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(config)
}

fn apply_rule_field(
    rule: &mut LifecycleRule,
    name: &[u8],
    text: String,
    in_expiration: bool,
) -> StorageClientResult<()> {
    match name {
        b"ID" => rule.id = Some(text),
        b"Status" => rule.status = RuleStatus::parse_lenient(&text),
        b"Prefix" => rule.prefix = Some(text),
        // Days and Date also appear under Transition; only expiration matters here
        b"Days" if in_expiration => {
            let days = text
                .trim()
                .parse::<u32>()
                .map_err(|e| xml_error("Failed to parse days", e))?;
            rule.expiration_days = Some(days);
        }
        b"Date" if in_expiration => rule.expiration_date = Some(parse_date(text.trim())?),
        _ => {}
    }
    Ok(())
}

/// Decode a `GET ?location` response body into the raw constraint
pub(crate) fn parse_location_constraint(xml: &str) -> StorageClientResult<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut text_buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| xml_error("Error parsing XML", e))?;

        match event {
            Event::Start(e) if e.name().as_ref() == b"LocationConstraint" => {
                return read_text(&mut reader, &mut text_buf);
            }
            Event::Empty(e) if e.name().as_ref() == b"LocationConstraint" => {
                return Ok(String::new());
            }
            Event::Eof => {
                return Err(StorageClientError::Xml(
                    "Missing LocationConstraint element".to_string(),
                ))
            }
            _ => {}
        }
        buf.clear();
    }
}
