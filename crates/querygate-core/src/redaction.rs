use serde::{Deserialize, Serialize};

/// Connection metadata that is safe to log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactedConnection {
    pub engine: Option<String>,
    pub host: Option<String>,
    pub database: Option<String>,
    pub redacted: String,
}

/// Redact credentials from a connection string and pull out loggable metadata.
///
/// Handles both URL forms (`sqlite://sample.db`, `postgres://u:p@h/db`) and the
/// SQLite shorthand `sqlite::memory:`.
pub fn redact_connection_string(conn: &str) -> RedactedConnection {
    let Some(scheme_end) = conn.find("://") else {
        let (engine, database) = match conn.split_once(':') {
            Some((engine, rest)) if !engine.is_empty() => {
                (Some(engine.to_string()), non_empty(rest))
            }
            _ => (None, non_empty(conn)),
        };
        return RedactedConnection {
            engine,
            host: None,
            database: database.map(strip_query),
            redacted: redact_query_secrets(conn),
        };
    };

    let engine = non_empty(&conn[..scheme_end]);
    let after_scheme = &conn[scheme_end + 3..];
    if engine.as_deref() == Some("sqlite") {
        return RedactedConnection {
            engine,
            host: None,
            database: non_empty(&strip_query(after_scheme.to_string())),
            redacted: redact_query_secrets(conn),
        };
    }

    let (authority, path) = after_scheme.split_once('/').unwrap_or((after_scheme, ""));
    let (credentials, host_port) = match authority.rsplit_once('@') {
        Some((credentials, host_port)) => (Some(credentials), host_port),
        None => (None, authority),
    };

    let mut redacted = conn[..scheme_end + 3].to_string();
    if let Some(credentials) = credentials {
        match credentials.split_once(':') {
            Some((user, _)) => redacted.push_str(&format!("{user}:***@")),
            None => redacted.push_str(&format!("{credentials}@")),
        }
    }
    redacted.push_str(host_port);
    if after_scheme.contains('/') {
        redacted.push('/');
        redacted.push_str(path);
    }

    let host = host_port
        .rsplit_once(':')
        .map_or(host_port, |(host, _)| host);

    RedactedConnection {
        engine,
        host: non_empty(host),
        database: non_empty(&strip_query(path.to_string())),
        redacted: redact_query_secrets(&redacted),
    }
}

/// Replace secret-looking query parameters anywhere in free text.
///
/// Used on transport errors, which may quote the request URL.
pub fn redact_secrets(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            if word.contains('?') || word.contains('&') {
                redact_query_secrets(word)
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn redact_query_secrets(text: &str) -> String {
    let Some(query_start) = text.find('?') else {
        return text.to_string();
    };

    let (base, query) = text.split_at(query_start + 1);
    let params = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if is_sensitive_key(key) => format!("{key}=***"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>();

    format!("{base}{}", params.join("&"))
}

fn is_sensitive_key(key: &str) -> bool {
    matches!(
        key.to_ascii_lowercase().as_str(),
        "password" | "pass" | "token" | "key" | "api_key" | "apikey"
    )
}

fn strip_query(value: String) -> String {
    match value.split_once('?') {
        Some((head, _)) => head.to_string(),
        None => value,
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
