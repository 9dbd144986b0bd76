//! Property tests for filter label parsing and file name normalization.

use std::path::{Path, PathBuf};

use proptest::prelude::*;
use wsave_core::{FilterRegistry, KnownExtensions, extension_of, normalize};

const LABELS: [&str; 4] = [
    "Tab-separated values (*.tab)",
    "Compressed tab-separated values (*.tab.gz)",
    "Comma-separated values (*.csv)",
    "Pickled data (*.pkl.gz)",
];

fn registry_extensions() -> KnownExtensions {
    FilterRegistry::<()>::from_labels(LABELS)
        .unwrap()
        .all_extensions()
        .clone()
}

#[test]
fn test_strips_known_tokens_and_keeps_unknown_ones() {
    let known = KnownExtensions::from_extensions([".tab", ".gz"]);
    assert_eq!(
        normalize(Path::new("report.tab.gz"), ".csv", &known),
        PathBuf::from("report.csv")
    );
    assert_eq!(
        normalize(Path::new("report.v2"), ".csv", &known),
        PathBuf::from("report.v2.csv")
    );
}

proptest! {
    #[test]
    fn test_compound_extension_is_parsed_exactly(
        prefix in "[A-Za-z][A-Za-z ,-]{0,20}",
        first in "[a-z0-9]{1,5}",
        second in "[a-z0-9]{1,5}",
    ) {
        let label = format!("{prefix} (*.{first}.{second})");
        let expected = format!(".{first}.{second}");
        prop_assert_eq!(extension_of(&label).unwrap(), expected.as_str());
    }

    #[test]
    fn test_normalization_is_idempotent(
        dir in prop::option::of("/[a-z]{1,6}(/[a-z.]{1,6}){0,2}"),
        name in "[a-z]{1,8}(\\.(tab|gz|csv|pkl|v2|bak|)){0,4}",
        label_index in 0..LABELS.len(),
    ) {
        let known = registry_extensions();
        let extension = extension_of(LABELS[label_index]).unwrap();
        let path = match dir {
            Some(dir) => Path::new(&dir).join(&name),
            None => PathBuf::from(&name),
        };

        let once = normalize(&path, extension, &known);
        let twice = normalize(&once, extension, &known);

        prop_assert_eq!(&once, &twice);
        prop_assert!(once.to_string_lossy().ends_with(extension));
        prop_assert_eq!(once.parent(), path.parent());
    }
}
