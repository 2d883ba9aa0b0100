//! Emoji textualization.
//!
//! Each emoji grapheme is replaced by a tag derived from its CLDR name,
//! surrounded by spaces and angle brackets: `❤️` becomes ` <red_heart> `.

use unicode_segmentation::UnicodeSegmentation;

const TAG_OPEN: &str = " <";
const TAG_CLOSE: &str = "> ";

/// Variation selector-16 (emoji presentation).
const VS16: char = '\u{FE0F}';

/// Replaces every emoji in `text` with its textual tag.
pub fn handle_emojis(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() + 16);

    for grapheme in text.graphemes(true) {
        match lookup_emoji(grapheme) {
            Some(emoji) => {
                result.push_str(TAG_OPEN);
                result.push_str(&tag_name(emoji.name()));
                result.push_str(TAG_CLOSE);
            }
            None => result.push_str(grapheme),
        }
    }

    result
}

/// Resolves a grapheme to an emoji, tolerating a missing or extra VS16.
fn lookup_emoji(grapheme: &str) -> Option<&'static emojis::Emoji> {
    // Plain ASCII never forms an emoji on its own (keycaps need VS16 + U+20E3)
    if grapheme.is_ascii() {
        return None;
    }

    emojis::get(grapheme)
        .or_else(|| grapheme.strip_suffix(VS16).and_then(emojis::get))
        .or_else(|| {
            let mut qualified = String::with_capacity(grapheme.len() + VS16.len_utf8());
            qualified.push_str(grapheme);
            qualified.push(VS16);
            emojis::get(&qualified)
        })
}

/// Converts a CLDR name ("flag: United States") into a tag ("flag_United_States").
fn tag_name(name: &str) -> String {
    let mut tag = String::with_capacity(name.len());

    for c in name.chars() {
        if c.is_alphanumeric() {
            tag.push(c);
        } else if (c.is_whitespace() || c == '-' || c == '_') && !tag.ends_with('_') {
            tag.push('_');
        }
        // Other punctuation (":", ",", "’", parentheses) is dropped
    }

    tag.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart_with_variation_selector() {
        assert_eq!(handle_emojis("i love it ❤️"), "i love it  <red_heart> ");
    }

    #[test]
    fn test_heart_without_variation_selector() {
        assert_eq!(handle_emojis("\u{2764}"), " <red_heart> ");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let input = "no emoji here, just café and naïve";
        assert_eq!(handle_emojis(input), input);
    }

    #[test]
    fn test_multiple_emojis() {
        let result = handle_emojis("😂😂");
        assert_eq!(result, " <face_with_tears_of_joy>  <face_with_tears_of_joy> ");
    }

    #[test]
    fn test_tag_name_drops_punctuation() {
        assert_eq!(tag_name("flag: United States"), "flag_United_States");
        assert_eq!(tag_name("woman’s hat"), "womans_hat");
        assert_eq!(tag_name("A button (blood type)"), "A_button_blood_type");
    }
}
