pub struct RegionCode {}

impl RegionCode {
    /// Returns a region code string representing the "unknown" region.
    pub fn get_unknown() -> &'static str {
        return Self::zz();
    }

    pub fn zz() -> &'static str {
        return "ZZ";
    }

    /// Returns the region code for non-geographical entities, corresponding
    /// to the value for World in the UN M.49 schema.
    pub fn un001() -> &'static str {
        return "001";
    }
}
