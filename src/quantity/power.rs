quantity!(
    /// Installed capacity.
    Kilowatts, suffix: "kW", precision: 1
);

impl Kilowatts {
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0.0
    }

    #[must_use]
    pub fn as_megawatts(self) -> f64 {
        self.0 / 1000.0
    }
}
