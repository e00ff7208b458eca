//! The fallback strategy.
//!
//! Always matches at the lowest priority and always fails, so an input
//! no real strategy accepts is reported as an unsupported shape naming
//! its runtime type instead of silently defaulting.

use crate::context::ParseContext;
use crate::input::TemporalInput;
use crate::strategy::{
    tags, Cost, OptimizationHints, ParseStrategy, StrategyDescriptor, Validation,
};
use crate::{ParseError, ParseResult};
use jiff::Zoned;

/// The always-failing fallback strategy.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackStrategy;

impl ParseStrategy for FallbackStrategy {
    fn descriptor(&self) -> StrategyDescriptor {
        StrategyDescriptor {
            tag: tags::FALLBACK,
            priority: 0,
            description: "matches anything, fails with the runtime type",
        }
    }

    fn can_handle(&self, _input: &TemporalInput, _ctx: &ParseContext) -> bool {
        true
    }

    fn confidence(&self, _input: &TemporalInput, _ctx: &ParseContext) -> f64 {
        0.0
    }

    fn validate(&self, input: &TemporalInput, _ctx: &ParseContext) -> Validation {
        Validation::invalid(format!(
            "no supported conversion for input of type `{}`",
            input.type_name(),
        ))
    }

    fn parse(&self, input: &TemporalInput, _ctx: &ParseContext) -> ParseResult<Zoned> {
        Err(ParseError::unsupported().with_message(format!(
            "no supported conversion for input of type `{}`",
            input.type_name(),
        )))
    }

    fn optimization_hints(&self) -> OptimizationHints {
        OptimizationHints {
            cacheable: false,
            cost: Cost::Free,
        }
    }
}
