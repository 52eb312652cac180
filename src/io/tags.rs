//! Bidirectional registry between document tags and model types.

/// Every tag a model document may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    TruncatedPyramid,
    Cuboid,
    Prism,
    Stairs,
    Cylinder,
    Superstructure,
    Site,
    SuperBuilding,
    Building,
    ProductionActivity,
    TransportActivity,
    LinearInput,
}

const TAG_NAMES: [(Tag, &str); 12] = [
    (Tag::TruncatedPyramid, "TruncatedPyramid"),
    (Tag::Cuboid, "Cuboid"),
    (Tag::Prism, "Prism"),
    (Tag::Stairs, "Stairs"),
    (Tag::Cylinder, "Cylinder"),
    (Tag::Superstructure, "Superstructure"),
    (Tag::Site, "Site"),
    (Tag::SuperBuilding, "SuperBuilding"),
    (Tag::Building, "Building"),
    (Tag::ProductionActivity, "ProductionActivity"),
    (Tag::TransportActivity, "TransportActivity"),
    (Tag::LinearInput, "LinearInput"),
];

impl Tag {
    pub fn as_str(self) -> &'static str {
        TAG_NAMES
            .iter()
            .find(|(tag, _)| *tag == self)
            .map(|(_, name)| *name)
            .unwrap_or_else(|| unreachable!("every tag is registered"))
    }

    pub fn parse(name: &str) -> Option<Self> {
        TAG_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(tag, _)| *tag)
    }
}
