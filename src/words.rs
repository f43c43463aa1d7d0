pub const WORDS: &[&str] = &[
    "gerry", "kevin", "nibras", "kuntoro", "skill", "focus", "quick", "short", "smart", "train",
    "words", "clear", "logic", "flash", "check", "sharp", "track", "level", "basic", "value",
    "write", "limit", "timer", "point",
];
