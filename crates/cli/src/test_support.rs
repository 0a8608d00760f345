use crate::util::CliContext;
use gallery_pilot_emulators::EmulatorSettings;
use gallery_pilot_provider_mock::fixtures::{ToolbarGeneration, gallery_tree};
use rstest::fixture;

/// rstest fixture: CLI context over the loader toolbar fixture
#[fixture]
pub fn context() -> CliContext {
    context_for(ToolbarGeneration::Loader)
}

pub fn context_for(generation: ToolbarGeneration) -> CliContext {
    CliContext::new(gallery_tree(generation), EmulatorSettings::default())
}
