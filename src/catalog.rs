//! The static breed catalog and the optional user-supplied replacement.
//!
//! Names are stored exactly as the image API spells its path segments after
//! parsing: lowercase ASCII, modifier first ("standard poodle"). Uniqueness is
//! assumed, not enforced.

use anyhow::Result;
use std::fs;

/// Every breed the quiz can offer as a wrong answer.
pub static BREEDS: &[&str] = &[
    "affenpinscher",
    "african",
    "airedale",
    "akita",
    "appenzeller",
    "shepherd australian",
    "basenji",
    "beagle",
    "bluetick",
    "borzoi",
    "bouvier",
    "boxer",
    "brabancon",
    "briard",
    "norwegian buhund",
    "boston bulldog",
    "english bulldog",
    "french bulldog",
    "staffordshire bullterrier",
    "australian cattledog",
    "chihuahua",
    "chow",
    "clumber",
    "cockapoo",
    "border collie",
    "coonhound",
    "cardigan corgi",
    "cotondetulear",
    "dachshund",
    "dalmatian",
    "great dane",
    "scottish deerhound",
    "dhole",
    "dingo",
    "doberman",
    "norwegian elkhound",
    "entlebucher",
    "eskimo",
    "lapphund finnish",
    "bichon frise",
    "germanshepherd",
    "italian greyhound",
    "groenendael",
    "havanese",
    "afghan hound",
    "basset hound",
    "blood hound",
    "english hound",
    "ibizan hound",
    "plott hound",
    "walker hound",
    "husky",
    "keeshond",
    "kelpie",
    "komondor",
    "kuvasz",
    "labradoodle",
    "labrador",
    "leonberg",
    "lhasa",
    "malamute",
    "malinois",
    "maltese",
    "bull mastiff",
    "english mastiff",
    "tibetan mastiff",
    "mexicanhairless",
    "mix",
    "bernese mountain",
    "swiss mountain",
    "newfoundland",
    "otterhound",
    "caucasian ovcharka",
    "papillon",
    "pekinese",
    "pembroke",
    "miniature pinscher",
    "pitbull",
    "german pointer",
    "germanlonghair pointer",
    "pomeranian",
    "medium poodle",
    "miniature poodle",
    "standard poodle",
    "toy poodle",
    "pug",
    "puggle",
    "pyrenees",
    "redbone",
    "chesapeake retriever",
    "curly retriever",
    "flatcoated retriever",
    "golden retriever",
    "rhodesian ridgeback",
    "rottweiler",
    "saluki",
    "samoyed",
    "schipperke",
    "giant schnauzer",
    "miniature schnauzer",
    "english setter",
    "gordon setter",
    "irish setter",
    "sharpei",
    "english sheepdog",
    "shetland sheepdog",
    "shiba",
    "shihtzu",
    "blenheim spaniel",
    "brittany spaniel",
    "cocker spaniel",
    "irish spaniel",
    "japanese spaniel",
    "sussex spaniel",
    "welsh spaniel",
    "english springer",
    "stbernard",
    "american terrier",
    "australian terrier",
    "bedlington terrier",
    "border terrier",
    "cairn terrier",
    "dandie terrier",
    "fox terrier",
    "irish terrier",
    "kerryblue terrier",
    "lakeland terrier",
    "norfolk terrier",
    "norwich terrier",
    "patterdale terrier",
    "russell terrier",
    "scottish terrier",
    "sealyham terrier",
    "silky terrier",
    "tibetan terrier",
    "toy terrier",
    "welsh terrier",
    "westhighland terrier",
    "wheaten terrier",
    "yorkshire terrier",
    "tervuren",
    "vizsla",
    "spanish waterdog",
    "weimaraner",
    "whippet",
    "irish wolfhound",
];

/// Returns the built-in catalog as owned strings.
pub fn default_catalog() -> Vec<String> {
    BREEDS.iter().map(|b| b.to_string()).collect()
}

/// Loads a replacement catalog from a JSON array of breed-name strings.
pub fn load_catalog(file_path: &str) -> Result<Vec<String>> {
    if !std::path::Path::new(file_path).exists() {
        anyhow::bail!("Catalog file not found: {}", file_path);
    }
    let content = fs::read_to_string(file_path)?;
    let names: Vec<String> = serde_json::from_str(&content)
        .map_err(|err| anyhow::anyhow!("Catalog file is not a JSON array of strings: {}", err))?;
    if names.is_empty() {
        anyhow::bail!("Catalog file contains no breed names: {}", file_path);
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_invariants() {
        assert!(!BREEDS.is_empty());
        for name in BREEDS {
            assert!(name.is_ascii(), "non-ascii breed name: {}", name);
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == ' '),
                "unexpected character in breed name: {}",
                name
            );
            assert!(!name.starts_with(' ') && !name.ends_with(' '));
        }
    }

    #[test]
    fn test_builtin_catalog_contains_known_breeds() {
        assert!(BREEDS.contains(&"beagle"));
        assert!(BREEDS.contains(&"standard poodle"));
        assert_eq!(default_catalog().len(), BREEDS.len());
    }

    #[test]
    fn test_load_catalog_roundtrip() {
        let path = std::env::temp_dir().join("doggo_test_catalog.json");
        fs::write(&path, r#"["beagle", "pug", "whippet"]"#).unwrap();
        let names = load_catalog(&path.to_string_lossy()).unwrap();
        assert_eq!(names, vec!["beagle", "pug", "whippet"]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_catalog_rejects_empty_and_malformed() {
        let empty = std::env::temp_dir().join("doggo_test_catalog_empty.json");
        fs::write(&empty, "[]").unwrap();
        assert!(load_catalog(&empty.to_string_lossy()).is_err());
        let _ = fs::remove_file(&empty);

        let malformed = std::env::temp_dir().join("doggo_test_catalog_bad.json");
        fs::write(&malformed, r#"{"breeds": []}"#).unwrap();
        assert!(load_catalog(&malformed.to_string_lossy()).is_err());
        let _ = fs::remove_file(&malformed);

        assert!(load_catalog("/no/such/file.json").is_err());
    }
}
