use iterdns_domain::{DnsRecord, Message, RecordData, ResponseOutcome};

/// Lines printed for a decoded reply, or the outcome to report when the reply
/// is an error other than a missing name.
pub fn render_response(message: &Message) -> Result<Vec<String>, ResponseOutcome> {
    let outcome = message.outcome();
    let mut lines = vec![String::new()];

    if outcome == ResponseOutcome::NameError || (outcome.is_success() && message.answers.is_empty()) {
        lines.push("No DNS record found".to_string());
        return Ok(lines);
    }
    if !outcome.is_success() {
        return Err(outcome);
    }

    lines.push(format!(
        "===>Answer Section ({} answerRecords)<===",
        message.answers.len()
    ));
    lines.extend(message.answers.iter().filter_map(record_line));
    lines.push(String::new());

    if !message.additionals.is_empty() {
        lines.push(format!(
            "===>Additional Section ({} answerRecords)<===",
            message.additionals.len()
        ));
        lines.extend(message.additionals.iter().filter_map(record_line));
    }

    Ok(lines)
}

/// One aligned line per record; records of other types are not shown.
pub fn record_line(record: &DnsRecord) -> Option<String> {
    if matches!(record.data, RecordData::Opaque { .. }) {
        return None;
    }

    let auth = if record.authoritative {
        "authoritative"
    } else {
        "non-authoritative"
    };
    let truncated = if record.truncated {
        "truncated"
    } else {
        "not-truncated"
    };

    Some(format!(
        "{:<5} {:<35} {:<19} {:<13}",
        record.record_type.as_str(),
        record.data.to_string(),
        auth,
        truncated
    ))
}

pub fn error_line(error: &impl std::fmt::Display) -> String {
    format!("ERROR\t{}", error)
}
