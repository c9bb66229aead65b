use crate::mvu::pipeline::{Deps, Msg, PipelineModel, update};

/// Drives the pipeline loop: feeds `init_msg` and drains effects until the
/// machine settles. Failure messages are ordinary transitions (extraction
/// failures land in Idle, save failures back in Correcting), so the loop
/// itself never aborts.
pub async fn run_pipeline(model: &mut PipelineModel, init_msg: Msg, deps: Deps<'_>) {
    let mut effects = update(model, init_msg);
    while let Some(effect) = effects.pop() {
        let msg = super::pipeline::run_effect(effect, model, deps).await;
        let next = update(model, msg);
        effects.extend(next);
    }
}
