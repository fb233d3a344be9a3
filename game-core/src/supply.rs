//! Hand and prompt-card supply: the entropy source the session engine
//! draws from at round start.

use rand::Rng;
use rand::seq::SliceRandom;

pub const HAND_VOWELS: usize = 4;
pub const HAND_CONSONANTS: usize = 6;
pub const HAND_BLANKS: usize = 2;
pub const HAND_SIZE: usize = HAND_VOWELS + HAND_CONSONANTS + HAND_BLANKS;

/// Blank tiles are dealt as non-breaking spaces so they survive client-side
/// whitespace trimming.
pub const BLANK_TILE: char = '\u{00a0}';

// Vowels are weighted by listing the common ones twice.
const VOWEL_POOL: &[char] = &[
    'A', 'A', 'E', 'E', 'I', 'I', 'O', 'O', 'U', 'U', 'Ä', 'Ö', 'Ü', 'Y',
];
const CONSONANT_POOL: &[char] = &[
    'B', 'C', 'D', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W',
    'X', 'Z',
];

/// Deals a fresh 12-character hand: 4 vowels, 6 consonants, 2 blanks,
/// shuffled, with no letter appearing more than twice.
pub fn deal_hand() -> String {
    let mut rng = rand::thread_rng();
    let mut hand: Vec<char> = Vec::with_capacity(HAND_SIZE);
    draw_letters(&mut hand, VOWEL_POOL, HAND_VOWELS, &mut rng);
    draw_letters(&mut hand, CONSONANT_POOL, HAND_CONSONANTS, &mut rng);
    hand.extend(std::iter::repeat(BLANK_TILE).take(HAND_BLANKS));
    hand.shuffle(&mut rng);
    hand.into_iter().collect()
}

fn draw_letters(hand: &mut Vec<char>, pool: &[char], count: usize, rng: &mut impl Rng) {
    let mut drawn = 0;
    while drawn < count {
        let letter = pool[rng.gen_range(0..pool.len())];
        // At most two of any letter per hand; redraw instead.
        if hand.iter().filter(|&&h| h == letter).count() >= 2 {
            continue;
        }
        hand.push(letter);
        drawn += 1;
    }
}

/// The pool of prompt-card texts a game draws from. Deck cards shown to
/// guessers never carry text; these strings surface only on each player's
/// private prompt card.
#[derive(Debug)]
pub struct CardDeck {
    texts: Vec<String>,
}

impl CardDeck {
    /// Parses one prompt per line, dropping blanks and texts too short to
    /// be a usable prompt.
    pub fn from_text(raw: &str) -> Self {
        let texts = raw
            .lines()
            .map(str::trim)
            .filter(|line| line.chars().count() > 4)
            .map(str::to_string)
            .collect();
        Self { texts }
    }

    pub fn builtin() -> Self {
        Self::from_text(BUILTIN_PROMPTS)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn text(&self, index: usize) -> &str {
        self.texts.get(index).map(String::as_str).unwrap_or_default()
    }
}

const BUILTIN_PROMPTS: &str = "\
A brand name for glow-in-the-dark toothpaste
The noise a vending machine makes at 3am
A perfume for people who love old libraries
What the neighbor's cat is actually called
A startup that delivers single socks
The secret ingredient in grandma's stew
A dance move invented by accident
The password to the staff room fridge
A shampoo for nervous hedgehogs
What pirates shout when they stub a toe
The name of the moon's first food truck
A board game about waiting in line
The slogan of an invisible paint company
What robots dream about on weekends
A holiday celebrating lost umbrellas
The mascot of a tax advisory firm
A cocktail served only during eclipses
What you yell when the WiFi returns
The title of a film about sentient cheese
A village famous for backwards walking
The sound of a suitcase full of bees
A spa treatment involving warm spaghetti
What the last dinosaur wrote in its diary
A superhero whose power is mild confusion
The official anthem of escalator riders
A museum exhibit nobody may look at
What submarines whisper to each other
A candle scented like an empty meeting
The prize in a silence competition
A weather forecast for inside your shoe
What the office plant thinks of Mondays
A sport played entirely in revolving doors
The name of a dragon afraid of toast
A lullaby for overtired smoke detectors
What gnomes trade at midnight markets
A theme park ride through a spreadsheet
The autobiography of a parking meter
A sauce banned in three small countries
What the lighthouse says to passing fog
A convention for retired magicians' rabbits
The hold music of an underwater hotline
A statue commemorating spilled coffee
What moths argue about near porch lights
A festival where everyone speaks in rhyme
The warranty card for a haunted mirror
A cereal for people who jog in place
What the elevator hums between floors
A knitting pattern for square balloons
";
