//! Write a Helium 10 style keyword export for trying the filter by hand.

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

const SUBJECTS: &[&str] = &[
    "egcg", "green tea extract", "green tea", "matcha", "polyphenols", "catechins",
    "ashwagandha", "turmeric", "vitamin d3",
];
const QUALIFIERS: &[&str] = &["", "200 mg", "200mg", "vegan", "kosher", "organic", "for women"];
const FORMS: &[&str] = &[
    "capsules", "capsule", "supplement", "pills", "gummies", "tablets", "powder", "drops",
    "softgels", "",
];

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_keywords.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record([
        "Keyword Phrase",
        "Cerebro IQ Score",
        "Search Volume",
        "Search Volume Trend",
        "Competing Products",
    ])?;

    let mut rows = 0;
    for _ in 0..400 {
        let phrase = [rng.pick(SUBJECTS), rng.pick(QUALIFIERS), rng.pick(FORMS)]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        // Roughly one in twenty volumes is missing, as in real exports.
        let volume = if rng.below(20) == 0 {
            String::new()
        } else {
            format!("{}", 50 + rng.below(5_000))
        };
        let iq = rng.below(3_000).to_string();
        let trend = format!("{}%", rng.below(200) as i64 - 100);
        let competing = format!(">{}", rng.below(1_000));

        writer.write_record([&phrase, &iq, &volume, &trend, &competing])?;
        rows += 1;
    }
    writer.flush()?;

    println!("Wrote {rows} keyword rows to {output_path}");
    Ok(())
}
