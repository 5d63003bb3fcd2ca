// SPDX-License-Identifier: MIT

//! The portal's Tokyo-area table.

/// Area name to area id, as the portal numbers them.
pub const TOKYO_AREAS: &[(&str, &str)] = &[
    ("chiyoda", "1"),
    ("chuo", "2"),
    ("minato", "3"),
    ("koto", "4"),
    ("shinjuku", "5"),
    ("bunkyo", "6"),
    ("ota", "7"),
    ("shibuya", "8"),
    ("nerima", "9"),
    ("shinagawa", "10"),
    ("kawasaki", "11"),
    ("meguro", "12"),
];

/// Area id for a known area name.
pub fn area_id(name: &str) -> Option<&'static str> {
    TOKYO_AREAS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
}

/// Area ids swept by the parking-directory generator.
pub fn sweep_area_ids() -> impl Iterator<Item = String> {
    (1..=11).map(|n| n.to_string())
}
