//! Procedural naming for counties, duchies, kingdoms and rulers.
//!
//! Word-bank composition: a root and a suffix drawn per rank, with an
//! occasional epithet for rulers. Names are flavor only and carry no
//! uniqueness guarantee.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic name source for one generation run.
pub struct NameForge {
    rng: ChaCha8Rng,
}

impl NameForge {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Settlement-flavored county names ("Thornbury", "Eastondale").
    pub fn county_names(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.county_name()).collect()
    }

    /// March-flavored duchy names ("Harrowmark", "Veldenreach").
    pub fn duchy_names(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.duchy_name()).collect()
    }

    /// Realm-flavored kingdom names ("Velloria", "Old Castamar").
    pub fn kingdom_names(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.kingdom_name()).collect()
    }

    /// Personal names for ruling characters ("Aldric the Stern").
    pub fn ruler_names(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.ruler_name()).collect()
    }

    fn county_name(&mut self) -> String {
        let root = pick(&mut self.rng, &[
            "Ash", "Thorn", "Elm", "Stone", "Wick", "Harren", "Marsh", "Fenn",
            "Oak", "Briar", "Cold", "Deep", "Green", "Hazel", "Mill", "North",
            "Raven", "Salt", "Shadow", "West", "Winter", "Wolf", "Easton", "Gable",
        ]);
        let suffix = pick(&mut self.rng, &[
            "ford", "bury", "dale", "field", "gate", "ham", "hollow", "march",
            "moor", "shire", "stead", "ton", "vale", "watch", "wick", "wood",
        ]);
        format!("{}{}", root, suffix)
    }

    fn duchy_name(&mut self) -> String {
        let root = pick(&mut self.rng, &[
            "Alden", "Bryn", "Caer", "Dun", "Ebon", "Falken", "Garron", "Harrow",
            "Iron", "Karst", "Lorn", "Morven", "Nareth", "Osric", "Pellam", "Quor",
            "Rhosan", "Stather", "Tyrne", "Velden",
        ]);
        let suffix = pick(&mut self.rng, &[
            "mark", "march", "gard", "holt", "land", "mere", "reach", "rise",
            "vale", "wald",
        ]);
        format!("{}{}", root, suffix)
    }

    fn kingdom_name(&mut self) -> String {
        let root = pick(&mut self.rng, &[
            "Vell", "Cast", "Ardan", "Bel", "Cor", "Drav", "Elar", "Ferr",
            "Gal", "Hyr", "Ith", "Kael", "Lumen", "Myr", "Nor", "Ostar",
            "Ruv", "Sol", "Tham", "Vor",
        ]);
        let suffix = pick(&mut self.rng, &[
            "oria", "amar", "avia", "enia", "ethia", "holm", "ia", "mar",
            "onia", "heim", "wyn", "aria",
        ]);
        let name = format!("{}{}", root, suffix);
        if self.rng.gen_bool(0.25) {
            let epithet = pick(&mut self.rng, &["Old", "Greater", "High", "Outer", "Upper"]);
            format!("{} {}", epithet, name)
        } else {
            name
        }
    }

    fn ruler_name(&mut self) -> String {
        let given = pick(&mut self.rng, &[
            "Aldric", "Berwin", "Cedany", "Doran", "Edwyn", "Ferris", "Gwenna",
            "Halvard", "Isolde", "Joran", "Katrida", "Leofric", "Maelis", "Norbert",
            "Odessa", "Perrin", "Quill", "Rosalind", "Sigmund", "Theodric",
            "Ulrica", "Vencel", "Wilmot", "Ysmay",
        ]);
        if self.rng.gen_bool(0.4) {
            let epithet = pick(&mut self.rng, &[
                "the Stern", "the Bold", "the Quiet", "the Unready", "the Fair",
                "the Grim", "the Wise", "the Young", "the Elder", "the Lame",
                "Ironhand", "Oathkeeper", "the Pious", "the Cruel",
            ]);
            format!("{} {}", given, epithet)
        } else {
            given.to_string()
        }
    }
}

fn pick<'a>(rng: &mut ChaCha8Rng, options: &[&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}
