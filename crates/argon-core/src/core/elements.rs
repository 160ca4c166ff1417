use phf::phf_map;

/// Per-element properties used to seed masses and Lennard-Jones tables.
///
/// Masses are in amu, `lj_sigma` in Å, `lj_epsilon` in kcal/mol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementData {
    pub number: u8,
    pub symbol: &'static str,
    pub mass: f64,
    pub lj_sigma: f64,
    pub lj_epsilon: f64,
}

macro_rules! element {
    ($number:expr, $symbol:expr, $mass:expr, $sigma:expr, $epsilon:expr) => {
        ElementData {
            number: $number,
            symbol: $symbol,
            mass: $mass,
            lj_sigma: $sigma,
            lj_epsilon: $epsilon,
        }
    };
}

static ELEMENTS: phf::Map<&'static str, ElementData> = phf_map! {
    "H"  => element!(1,  "H",  1.008,   2.50, 0.030),
    "He" => element!(2,  "He", 4.0026,  2.56, 0.020),
    "Li" => element!(3,  "Li", 6.94,    2.18, 0.025),
    "B"  => element!(5,  "B",  10.81,   3.58, 0.095),
    "C"  => element!(6,  "C",  12.011,  3.40, 0.086),
    "N"  => element!(7,  "N",  14.007,  3.25, 0.170),
    "O"  => element!(8,  "O",  15.999,  2.96, 0.210),
    "F"  => element!(9,  "F",  18.998,  3.12, 0.061),
    "Ne" => element!(10, "Ne", 20.180,  2.75, 0.069),
    "Na" => element!(11, "Na", 22.990,  2.58, 0.0469),
    "Mg" => element!(12, "Mg", 24.305,  2.91, 0.111),
    "Si" => element!(14, "Si", 28.085,  3.83, 0.310),
    "P"  => element!(15, "P",  30.974,  3.74, 0.200),
    "S"  => element!(16, "S",  32.06,   3.56, 0.250),
    "Cl" => element!(17, "Cl", 35.45,   3.47, 0.265),
    "Ar" => element!(18, "Ar", 39.948,  3.40, 0.238),
    "K"  => element!(19, "K",  39.098,  3.14, 0.0328),
    "Ca" => element!(20, "Ca", 40.078,  2.41, 0.105),
    "Fe" => element!(26, "Fe", 55.845,  2.59, 0.013),
    "Zn" => element!(30, "Zn", 65.38,   1.96, 0.0125),
    "Br" => element!(35, "Br", 79.904,  3.62, 0.320),
    "I"  => element!(53, "I",  126.90,  3.83, 0.400),
};

/// Stand-in returned for elements missing from the table.
///
/// Carbon-like: light enough not to freeze dynamics, stiff enough not to
/// collapse under the default Lennard-Jones parameters.
pub const FALLBACK: ElementData = element!(6, "C", 12.011, 3.40, 0.086);

/// Case-insensitive lookup by element symbol.
pub fn by_symbol(symbol: &str) -> Option<&'static ElementData> {
    let mut canonical = String::with_capacity(2);
    let mut chars = symbol.trim().chars();
    canonical.extend(chars.next().map(|c| c.to_ascii_uppercase()));
    canonical.extend(chars.map(|c| c.to_ascii_lowercase()));
    ELEMENTS.get(canonical.as_str())
}

/// Lookup by atomic number.
pub fn by_number(number: u8) -> Option<&'static ElementData> {
    ELEMENTS.values().find(|e| e.number == number)
}

/// Lookup by symbol that never fails: undefined elements resolve to the
/// carbon-like [`FALLBACK`].
pub fn lookup(symbol: &str) -> &'static ElementData {
    by_symbol(symbol).unwrap_or(&FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_symbol_is_case_insensitive() {
        assert_eq!(by_symbol("na").map(|e| e.number), Some(11));
        assert_eq!(by_symbol("NA").map(|e| e.number), Some(11));
        assert_eq!(by_symbol("Na").map(|e| e.number), Some(11));
        assert_eq!(by_symbol(" cl ").map(|e| e.number), Some(17));
    }

    #[test]
    fn lookup_by_number_matches_symbol_lookup() {
        let argon = by_number(18).expect("argon should be defined");
        assert_eq!(argon.symbol, "Ar");
        assert_eq!(by_symbol("Ar"), Some(argon));
    }

    #[test]
    fn argon_carries_the_reference_lennard_jones_parameters() {
        let argon = lookup("Ar");
        assert_eq!(argon.lj_sigma, 3.40);
        assert_eq!(argon.lj_epsilon, 0.238);
        assert!((argon.mass - 39.948).abs() < 1e-9);
    }

    #[test]
    fn undefined_element_falls_back_to_carbon_like_values() {
        let unknown = lookup("Xx");
        assert_eq!(unknown.number, FALLBACK.number);
        assert_eq!(unknown.lj_sigma, FALLBACK.lj_sigma);
        assert!(by_symbol("Xx").is_none());
    }
}
