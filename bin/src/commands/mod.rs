//! CLI command implementations.

mod resample;

pub(crate) use resample::{
    duration_config, heikin_ashi_config, load_config, range_config, renko_config, resample,
    volume_config,
};
