use dao_core::notice::Notice;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    // Calculate column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let header_row: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_row.join("  ").trim_end());

    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("  "));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

/// Human-readable notices, one per line. Warnings are marked with `!`.
pub fn print_notices(notices: &[Notice]) {
    for n in notices {
        let mark = if n.is_warning() { "!" } else { "*" };
        println!("{mark} {n}");
    }
}

/// Either a JSON document carrying `value` and `notices`, or `message`
/// followed by the notices.
pub fn report<T: Serialize>(
    json: bool,
    value: &T,
    message: &str,
    notices: &[Notice],
) -> anyhow::Result<()> {
    if json {
        let mut doc = serde_json::to_value(value)?;
        match doc.as_object_mut() {
            Some(obj) => {
                obj.insert("notices".to_string(), serde_json::to_value(notices)?);
            }
            None => {
                doc = serde_json::json!({ "result": doc, "notices": notices });
            }
        }
        print_json(&doc)
    } else {
        if !message.is_empty() {
            println!("{message}");
        }
        print_notices(notices);
        Ok(())
    }
}
