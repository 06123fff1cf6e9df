//! Static reference data: species, spawn geometry, and the fixed reply pools.

use spacebots::Pos;

use crate::rng::Rng64;

#[derive(Debug, Clone, Copy)]
pub struct Animal {
    pub glyph: &'static str,
    pub name: &'static str,
    pub noise: Option<&'static str>,
}

/// Fallback vocalization for species without one of their own.
pub const DEFAULT_NOISE: &str = "💖";

pub static ANIMALS: &[Animal] = &[
    Animal { glyph: "🐕", name: "dog", noise: Some("woof!") },
    Animal { glyph: "🐈", name: "cat", noise: Some("miaow!") },
    Animal { glyph: "🐁", name: "mouse", noise: Some("squeak!") },
    Animal { glyph: "🦛", name: "hippo", noise: None },
    Animal { glyph: "🐸", name: "frog", noise: Some("ribbet!") },
    Animal { glyph: "🦖", name: "t-rex", noise: Some("RAWR!") },
    Animal { glyph: "🦜", name: "parrot", noise: Some("HELLO!") },
    Animal { glyph: "🐊", name: "crocodile", noise: None },
    Animal { glyph: "🦒", name: "giraffe", noise: None },
    Animal { glyph: "🦆", name: "duck", noise: Some("quack!") },
    Animal { glyph: "🐑", name: "sheep", noise: Some("baa!") },
    Animal { glyph: "🐢", name: "turtle", noise: None },
    Animal { glyph: "🐘", name: "elephant", noise: None },
    Animal { glyph: "🦉", name: "owl", noise: Some("hoot hoot!") },
    Animal { glyph: "🐉", name: "dragon", noise: Some("🔥") },
    Animal { glyph: "🚀", name: "rocket", noise: None },
    Animal { glyph: "🦊", name: "fox", noise: Some("Wrahh!") },
    Animal { glyph: "🦄", name: "unicorn", noise: Some("✨") },
    Animal { glyph: "🦔", name: "hedgehog", noise: Some("scurry, scurry, scurry") },
    Animal { glyph: "🦕", name: "brontosaurus", noise: Some("MEEEHHH!") },
    Animal { glyph: "🐌", name: "snail", noise: Some("slurp!") },
    Animal { glyph: "🐫", name: "camel", noise: None },
    Animal { glyph: "🐇", name: "rabbit", noise: None },
    Animal { glyph: "🐛", name: "caterpillar", noise: Some("munch!") },
    Animal { glyph: "🦙", name: "llama", noise: None },
    Animal { glyph: "🦀", name: "crab", noise: Some("click!") },
    Animal { glyph: "🦘", name: "kangaroo", noise: Some("Chortle chortle!") },
    Animal { glyph: "🦇", name: "bat", noise: Some("screech!") },
    Animal { glyph: "🐄", name: "cow", noise: Some("Moo!") },
];

pub const GENIE_NAME: &str = "Pet Agency Genie";
pub const GENIE_GLYPH: &str = "🧞";
pub const GENIE_HOME: Pos = Pos { x: 60, y: 15 };

/// The seven fixed spawn coordinates around the genie's home.
pub static SPAWN_POINTS: &[Pos] = &[
    Pos { x: 58, y: 15 },
    Pos { x: 58, y: 13 },
    Pos { x: 60, y: 13 },
    Pos { x: 62, y: 13 },
    Pos { x: 62, y: 15 },
    Pos { x: 62, y: 17 },
    Pos { x: 60, y: 17 },
];

static SAD_MESSAGES: &[&str] = &[
    "Was I not a good {species}?",
    "I thought you liked me.",
    "😢",
    "What will I do now?",
    "But where will I go?",
    "One day I might learn to trust again...",
    "I only wanted to make you happy.",
    "My heart hurts.",
    "Did I do something wrong?",
    "But why?",
    "💔",
];

/// Politeness tokens. A mention must contain at least one of these for an
/// adoption to go through.
pub static MANNERS: &[&str] = &[
    "please",
    "bitte",
    "le do thoil",
    "sudo",
    "per favore",
    "oh mighty djinn",
    "s'il vous plaît",
    "s'il vous plait",
    "svp",
    "por favor",
    "kudasai",
    "onegai shimasu",
];

pub static THANKS_REPLIES: &[&str] = &["You're welcome!", "No problem!", "❤️"];

/// Vocalization for a glyph, with the affection fallback for quiet species
/// and unknown glyphs alike.
pub fn noise_for(glyph: &str) -> &'static str {
    ANIMALS
        .iter()
        .find(|a| a.glyph == glyph)
        .and_then(|a| a.noise)
        .unwrap_or(DEFAULT_NOISE)
}

/// A random commiseration from a freshly abandoned pet.
pub fn sad_message(rng: &mut Rng64, species: &str) -> String {
    let template = rng.pick(SAD_MESSAGES).copied().unwrap_or("💔");
    template.replace("{species}", species)
}
