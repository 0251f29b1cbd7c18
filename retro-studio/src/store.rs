use aging_effect::{
    AgingParams, Preset,
    params::{AGE_RANGE, DAMAGE_RANGE, EXPOSURE_RANGE, TINT_RANGE, VIGNETTE_RANGE},
};

/// The single place slider positions live.
///
/// Slider moves and preset buttons both write here, and the pipeline reads
/// one [`ParamStore::snapshot`] per render, so what is displayed and what is
/// rendered never disagree.
#[derive(Debug, Clone, Default)]
pub struct ParamStore {
    params: AgingParams,
}

impl ParamStore {
    pub fn new(initial: AgingParams) -> Self {
        Self {
            params: initial.clamped(),
        }
    }

    pub fn snapshot(&self) -> AgingParams {
        self.params
    }

    pub fn set_age(&mut self, value: i32) {
        self.params.age = value.clamp(AGE_RANGE.0, AGE_RANGE.1);
    }

    pub fn set_exposure(&mut self, value: i32) {
        self.params.exposure = value.clamp(EXPOSURE_RANGE.0, EXPOSURE_RANGE.1);
    }

    pub fn set_tint(&mut self, value: i32) {
        self.params.tint = value.clamp(TINT_RANGE.0, TINT_RANGE.1);
    }

    pub fn set_vignette(&mut self, value: i32) {
        self.params.vignette = value.clamp(VIGNETTE_RANGE.0, VIGNETTE_RANGE.1);
    }

    pub fn set_damage(&mut self, value: i32) {
        self.params.damage = value.clamp(DAMAGE_RANGE.0, DAMAGE_RANGE.1);
    }

    /// Moves every slider to the preset's position.
    pub fn apply_preset(&mut self, preset: Preset) {
        log::debug!("applying preset {}", preset.name());
        self.params = preset.params().clamped();
    }

    /// The preset matching the current sliders, if any.
    pub fn active_preset(&self) -> Option<Preset> {
        Preset::all_presets()
            .iter()
            .find(|preset| preset.params() == self.params)
            .copied()
    }

    pub fn reset(&mut self) {
        self.params = AgingParams::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_writes_are_clamped() {
        let mut store = ParamStore::default();
        store.set_age(140);
        store.set_exposure(-500);
        store.set_tint(33);
        store.set_vignette(-1);
        store.set_damage(101);

        assert_eq!(store.snapshot(), AgingParams::new(100, -100, 33, 0, 100));
    }

    #[test]
    fn test_preset_updates_sliders() {
        let mut store = ParamStore::new(AgingParams::default());
        store.apply_preset(Preset::Antique);

        assert_eq!(store.snapshot(), Preset::Antique.params());
        assert_eq!(store.active_preset(), Some(Preset::Antique));

        // a later slider move is visible in the next snapshot
        store.set_damage(0);
        assert_eq!(store.snapshot().damage, 0);
        assert_eq!(store.snapshot().age, Preset::Antique.params().age);
        assert_eq!(store.active_preset(), None);
    }

    #[test]
    fn test_reset() {
        let mut store = ParamStore::new(AgingParams::new(999, 0, 0, 0, 0));
        assert_eq!(store.snapshot().age, 100);

        store.reset();
        assert_eq!(store.snapshot(), AgingParams::default());
    }
}
