use motion_core::error::BuildError;
use motion_core::{ChannelCfg, FillPolicy, MotionEvaluator};
use motion_store::MemoryStore;
use rstest::rstest;

#[rstest]
fn builder_missing_store_yields_typed_build_error() {
    let err = MotionEvaluator::<MemoryStore>::builder()
        // missing with_store()
        .with_channels(ChannelCfg::new(["x"], FillPolicy::Reject))
        .try_build()
        .expect_err("should fail with MissingStore");

    match err.downcast_ref::<BuildError>() {
        Some(BuildError::MissingStore) => {}
        other => panic!("expected MissingStore, got: {other:?}"),
    }
}

#[rstest]
fn builder_missing_channels_yields_typed_build_error() {
    let err = MotionEvaluator::builder()
        .with_store(MemoryStore::new())
        .build()
        .expect_err("should fail with MissingChannels");
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::MissingChannels)
    ));
}

#[rstest]
#[case(ChannelCfg::new(["x", "x"], FillPolicy::Reject), None)]
#[case(ChannelCfg::new(["x", ""], FillPolicy::Reject), None)]
#[case(ChannelCfg::new(["x"], FillPolicy::Reject), Some(("y", 1.0)))]
#[case(ChannelCfg::new(["x"], FillPolicy::Reject), Some(("x", -0.5)))]
#[case(ChannelCfg::new(["x"], FillPolicy::Reject), Some(("x", 0.0)))]
fn builder_rejects_invalid_channels_and_weights(
    #[case] channels: ChannelCfg,
    #[case] weight: Option<(&str, f64)>,
) {
    let mut b = MotionEvaluator::builder()
        .with_store(MemoryStore::new())
        .with_channels(channels);
    if let Some((ch, w)) = weight {
        b = b.with_weight(ch, w);
    }
    let err = b.build().expect_err("invalid config");
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::InvalidConfig(_))
    ));
}

#[rstest]
fn fill_policy_can_be_set_after_channels() {
    let ev = MotionEvaluator::builder()
        .with_store(MemoryStore::new())
        .with_channels(ChannelCfg::new(["x"], FillPolicy::Reject))
        .with_fill_policy(FillPolicy::Zero)
        .build()
        .unwrap();
    assert_eq!(ev.config().channels.fill_policy, FillPolicy::Zero);
}

#[rstest]
fn fill_policy_set_before_channels_still_applies() {
    let ev = MotionEvaluator::builder()
        .with_fill_policy(FillPolicy::CarryForward)
        .with_store(MemoryStore::new())
        .with_channels(ChannelCfg::new(["x"], FillPolicy::Reject))
        .build()
        .unwrap();
    assert_eq!(ev.config().channels.fill_policy, FillPolicy::CarryForward);
}
