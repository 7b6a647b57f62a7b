use crate::schema::{DetectionResult, Preview, ResultSet};
use crate::tools::ToolId;
use colored::Colorize;

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn kv(key: &str, value: impl std::fmt::Display) -> String {
    format!("{:<10} {}", key, value)
}

/// Body lines of one preview, without indentation.
pub fn content_lines(preview: &Preview) -> Vec<String> {
    let mut lines = Vec::new();
    match preview {
        Preview::Json(json) => lines.extend(json.formatted.lines().map(String::from)),
        Preview::Sql(sql) => lines.extend(sql.formatted.lines().map(String::from)),
        Preview::Jwt(jwt) => {
            lines.push("Header".to_string());
            lines.extend(pretty(&jwt.header).lines().map(String::from));
            lines.push("Payload".to_string());
            lines.extend(pretty(&jwt.payload).lines().map(String::from));
            for claim in &jwt.claim_times {
                lines.push(kv(&claim.claim, &claim.iso8601));
            }
            lines.push(kv("signature", &jwt.signature));
        }
        Preview::Color(color) => {
            lines.push(kv("value", &color.value));
            if let Some(hex) = &color.hex {
                lines.push(kv("hex", hex));
            }
            if let Some([r, g, b]) = color.rgb {
                lines.push(kv("rgb", format!("{}, {}, {}", r, g, b)));
            }
        }
        Preview::Timestamp(ts) => {
            lines.push(kv("ISO 8601", &ts.iso8601));
            lines.push(kv("Local", &ts.local));
            lines.push(kv("Relative", &ts.relative));
        }
        Preview::UnicodeEscape(text) | Preview::Base64(text) | Preview::UrlEncoded(text) => {
            lines.extend(text.decoded.lines().map(String::from))
        }
        Preview::NumberBase(n) => {
            lines.push(kv("Decimal", &n.decimal));
            lines.push(kv("Hex", &n.hexadecimal));
            lines.push(kv("Octal", &n.octal));
            lines.push(kv("Binary", &n.binary));
        }
        Preview::TextStats(stats) => {
            lines.push(kv("Characters", stats.chars));
            lines.push(kv("Words", stats.words));
            lines.push(kv("Lines", stats.lines));
            lines.push(kv("Bytes", stats.bytes));
        }
        Preview::Qrcode(qr) if qr.too_large => lines.push("Too large for a QR code".to_string()),
        Preview::Qrcode(qr) => lines.extend(qr.rendered.lines().map(String::from)),
        Preview::HashDigest(hashes) => {
            for digest in &hashes.digests {
                lines.push(kv(digest.algorithm.label(), &digest.hex));
            }
        }
    }
    lines
}

fn heading(result: &DetectionResult, color: bool) -> String {
    let title = result.label.to_uppercase();
    let meta = format!("({}, priority {})", result.id, result.priority);
    if color {
        format!("{} {}", title.bold().cyan(), meta.dimmed())
    } else {
        format!("{} {}", title, meta)
    }
}

/// Human-readable listing of a result set.
///
/// `raw` drops headings and colors; each line is prefixed with the detector
/// id instead so the output stays greppable.
pub fn render_human(set: &ResultSet, color: bool, raw: bool, suggest_tools: bool) -> String {
    let mut out = String::new();
    if set.is_empty() {
        if !raw {
            out.push_str("No input.");
        }
        return out;
    }

    for (i, result) in set.iter().enumerate() {
        if raw {
            for line in content_lines(&result.content) {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(result.id.as_str());
                out.push('\t');
                out.push_str(&line);
            }
            continue;
        }

        if i > 0 {
            out.push_str("\n\n");
        }
        out.push_str(&heading(result, color));
        for line in content_lines(&result.content) {
            out.push_str("\n  ");
            out.push_str(&line);
        }
    }

    if !raw && suggest_tools && !set.has_specific_match() {
        out.push_str("\n\nNo specific format detected. Try a dedicated tool:");
        for tool in ToolId::ALL {
            out.push_str(&format!("\n  {:<18} {}", tool.as_str(), tool.label()));
        }
    }
    out
}
