//! Built-in translation rules.

/// Whole-sentence translations, keyed by lowercase formal phrase.
pub const EXACT_PHRASES: &[(&str, &str)] = &[
    ("i would like to request your assistance", "can you help me out?"),
    ("please wait a moment", "hang on a sec"),
    ("thank you for your help", "thanks a lot!"),
    ("i appreciate your time", "thanks for your time"),
    ("could you please", "can you"),
    ("i would be grateful if", "it would be awesome if"),
    ("please let me know", "let me know"),
    ("i apologize for the inconvenience", "sorry about that"),
    ("i hope this email finds you well", "hey there"),
    ("i am writing to inform you", "just wanted to let you know"),
    ("i would like to express my gratitude", "thanks so much"),
    ("please find attached", "here's the file"),
    ("i look forward to hearing from you", "let me know what you think"),
    ("please do not hesitate to contact me", "feel free to reach out"),
    ("i would like to schedule a meeting", "want to meet up?"),
    ("please confirm your attendance", "are you coming?"),
    ("i regret to inform you", "unfortunately"),
    ("i am pleased to announce", "great news!"),
    ("please be advised", "heads up"),
    ("i would like to take this opportunity", "wanted to mention"),
];

/// Phrase-level rewrites. Evaluated longest key first; declaration order
/// breaks ties between keys of equal length.
pub const PHRASE_REPLACEMENTS: &[(&str, &str)] = &[
    ("i would like to", "i want to"),
    ("please", ""),
    ("would you", "can you"),
    ("could you", "can you"),
    ("i am", "i'm"),
    ("you are", "you're"),
    ("it is", "it's"),
    ("do not", "don't"),
    ("cannot", "can't"),
    ("will not", "won't"),
    ("should not", "shouldn't"),
    ("thank you", "thanks"),
    ("i appreciate", "thanks for"),
    ("i apologize", "sorry"),
    ("i hope", "hoping"),
    ("i look forward to", "looking forward to"),
    ("please let me know", "let me know"),
    ("i would be grateful", "it would be awesome"),
    ("i regret to inform", "unfortunately"),
    ("i am pleased to", "great news!"),
    ("please be advised", "heads up"),
    ("i would like to take this opportunity", "wanted to mention"),
    ("please find attached", "here's the file"),
    ("i look forward to hearing from you", "let me know what you think"),
    ("please do not hesitate to contact me", "feel free to reach out"),
    ("i would like to schedule a meeting", "want to meet up?"),
    ("please confirm your attendance", "are you coming?"),
    ("i am writing to inform you", "just wanted to let you know"),
    ("i would like to express my gratitude", "thanks so much"),
    ("i hope this email finds you well", "hey there"),
    ("i apologize for the inconvenience", "sorry about that"),
];

/// Casual interjection used when no rule applies.
pub const FALLBACK_PREFIX: &str = "Hey! ";
