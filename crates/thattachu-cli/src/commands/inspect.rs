use thattachu_core::levels;
use thattachu_core::phonetic::PhoneticTable;
use thattachu_core::unicode::count_tamil_letters;
use unicode_width::UnicodeWidthStr;

// Tamil clusters are double-width in most terminals, so format-string
// padding (which counts chars) misaligns them. Pad by display width.
fn pad_to(s: &str, width: usize) -> String {
    let mut out = s.to_string();
    for _ in s.width()..width {
        out.push(' ');
    }
    out
}

pub fn segment_cmd(text: &str, json: bool) {
    let seg = PhoneticTable::global().segment_target(text);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&seg).expect("JSON serialization failed")
        );
        return;
    }

    let keys: String = seg.keystrokes.iter().collect();
    println!("{} -> {}", text, keys);

    let width = seg
        .spans
        .iter()
        .map(|s| s.grapheme.width())
        .max()
        .unwrap_or(0);
    for span in &seg.spans {
        println!(
            "  {} -> {:<4} [{}..{}]",
            pad_to(&span.grapheme, width),
            span.keys,
            span.start,
            span.end
        );
    }
}

pub fn preview_cmd(keys: &str) {
    println!("{}", PhoneticTable::global().transliterate(keys));
}

pub fn levels_cmd(json: bool) {
    let all = levels::levels();

    if json {
        let entries: Vec<serde_json::Value> = all
            .iter()
            .enumerate()
            .map(|(i, level)| {
                serde_json::json!({
                    "level": i + 1,
                    "description": level.description,
                    "items": level.content.len(),
                    "letters": level.content.iter().map(|t| count_tamil_letters(t)).sum::<usize>(),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).expect("JSON serialization failed")
        );
        return;
    }

    let desc_width = all
        .iter()
        .map(|l| l.description.width())
        .max()
        .unwrap_or(0);
    for (i, level) in all.iter().enumerate() {
        let letters: usize = level.content.iter().map(|t| count_tamil_letters(t)).sum();
        println!(
            "{:>2}  {}  {:>2} items  {:>3} letters   e.g. {}",
            i + 1,
            pad_to(&level.description, desc_width),
            level.content.len(),
            letters,
            level.content.first().map(String::as_str).unwrap_or(""),
        );
    }
}
