use crate::ListingSet;

/// Discord rejects message content longer than this many characters.
pub const DEFAULT_MESSAGE_LIMIT: usize = 2000;

/// Texts sent to the webhooks.
///
/// `status_template` understands the `{count}` and `{started_at}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub startup: String,
    pub new_header: String,
    pub removed_header: String,
    pub status_template: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            startup: "Bot byl spuštěn.".to_string(),
            new_header: "Nové nabídky:".to_string(),
            removed_header: "Smazané nabídky:".to_string(),
            status_template: "Počet bytů: {count}\nKontrola byla spuštěna v {started_at}"
                .to_string(),
        }
    }
}

/// Render a digest as one or more messages, each no longer than `limit` characters.
///
/// Every chunk starts with `header` and lists URLs one per line. A URL too long to fit
/// beside the header is cut and ends with `…`. No listings means no messages.
pub fn format_digest(header: &str, listings: &ListingSet, limit: usize) -> Vec<String> {
    let header_len = header.chars().count();
    let room = limit.saturating_sub(header_len + 1);
    let mut chunks = Vec::new();
    let mut chunk = header.to_string();
    let mut chunk_len = header_len;
    let mut lines = 0usize;

    for url in listings {
        let line = fit_line(url, room);
        let line_len = 1 + line.chars().count();
        if lines > 0 && chunk_len + line_len > limit {
            chunks.push(std::mem::replace(&mut chunk, header.to_string()));
            chunk_len = header_len;
            lines = 0;
        }
        chunk.push('\n');
        chunk.push_str(&line);
        chunk_len += line_len;
        lines += 1;
    }

    if lines > 0 {
        chunks.push(chunk);
    }
    chunks
}

fn fit_line(url: &str, room: usize) -> String {
    if url.chars().count() <= room {
        return url.to_string();
    }
    let mut cut: String = url.chars().take(room.saturating_sub(1)).collect();
    if room > 0 {
        cut.push('…');
    }
    cut
}

pub fn format_status(template: &str, count: usize, started_at: &str) -> String {
    template
        .replace("{count}", &count.to_string())
        .replace("{started_at}", started_at)
}
