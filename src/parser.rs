//! The input parser (orchestrator).
//!
//! One call: build a context, snapshot the registry, walk strategies in
//! descending priority order, and hand the input to the first strategy
//! whose `can_handle` answers true. That strategy's result is final:
//! there is no retry on a different strategy, so ambiguity is resolved
//! entirely by priority order at registration time.

use crate::classifier::TypeClassifier;
use crate::context::{ParseContext, ParseFailure, ParseOutcome, ParseSuccess};
use crate::input::{EpochDate, TemporalInput};
use crate::options::{CalendarId, ParseOptions};
use crate::registry::{RegistryStats, StrategyRegistry};
use crate::strategy::{default_set, ParseStrategy};
use crate::{host, ParseError, ParseResult};
use core::str::FromStr;
use jiff::tz::TimeZone;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

/// Validates a time-zone identifier, returning the resolved zone.
pub fn validate_time_zone(id: &str) -> ParseResult<TimeZone> {
    host::resolve_time_zone(id)
}

/// The orchestrator driving the strategy registry against one input.
#[derive(Debug, Default)]
pub struct InputParser {
    registry: StrategyRegistry,
}

impl InputParser {
    /// A parser seeded with the built-in strategy set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: StrategyRegistry::seeded(default_set()),
        }
    }

    /// The underlying registry.
    #[must_use]
    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// A classifier over this parser's registry.
    #[must_use]
    pub fn classifier(&self) -> TypeClassifier<'_> {
        TypeClassifier::new(&self.registry)
    }

    /// Registers or replaces a strategy at runtime, re-sorting the
    /// active list.
    pub fn add_strategy(&self, strategy: Arc<dyn ParseStrategy>) {
        self.registry.register(strategy);
    }

    /// Restores the built-in strategy set.
    pub fn reset_strategies(&self) {
        log::debug!("resetting strategies to the built-in set");
        self.registry.replace_all(default_set());
    }

    /// Diagnostic summary of the active strategies.
    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        self.registry.stats()
    }

    /// Converts one input into the canonical zoned date-time value, or
    /// fails with a classified error.
    pub fn parse(&self, input: impl Into<TemporalInput>, options: &ParseOptions) -> ParseOutcome {
        let start = Instant::now();
        // Resolve and validate the target zone and calendar before any
        // strategy runs.
        let time_zone = match &options.time_zone {
            Some(id) => host::resolve_time_zone(id),
            None => Ok(host::default_time_zone()),
        };
        let calendar = match &options.calendar {
            Some(id) => CalendarId::from_str(id),
            None => Ok(host::default_calendar()),
        };
        let (time_zone, calendar) = match (time_zone, calendar) {
            (Ok(tz), Ok(cal)) => (tz, cal),
            (Err(error), _) | (_, Err(error)) => {
                return Err(ParseFailure {
                    error,
                    strategy: None,
                    elapsed: start.elapsed(),
                });
            }
        };

        let mut ctx = ParseContext::new(time_zone, calendar, options.overflow)
            .with_explicit(options.time_zone.is_some(), options.calendar.is_some());

        let input = match input.into() {
            TemporalInput::Absent => {
                ctx.note("absent", "defaulted to current instant");
                TemporalInput::Date(EpochDate::now())
            }
            other => other,
        };

        let snapshot = self.registry.all_sorted_by_priority();
        for strategy in snapshot.iter() {
            if !strategy.can_handle(&input, &ctx) {
                continue;
            }
            let descriptor = strategy.descriptor();
            log::trace!(
                "input of type `{}` matched strategy `{}`",
                input.type_name(),
                descriptor.tag,
            );

            let fast = strategy.check_fast_path(&input, &ctx);
            if let Some(value) = fast.value {
                return Ok(ParseSuccess {
                    value,
                    calendar,
                    strategy: descriptor.tag,
                    elapsed: ctx.elapsed(),
                    fast_path: true,
                    confidence: fast.confidence,
                });
            }

            // The selected strategy's result is final.
            return match strategy.parse(&input, &ctx) {
                Ok(value) => Ok(ParseSuccess {
                    value,
                    calendar,
                    strategy: descriptor.tag,
                    elapsed: ctx.elapsed(),
                    fast_path: false,
                    confidence: strategy.confidence(&input, &ctx),
                }),
                Err(error) => {
                    log::debug!("strategy `{}` failed: {error}", descriptor.tag);
                    Err(ParseFailure {
                        error,
                        strategy: Some(descriptor.tag),
                        elapsed: ctx.elapsed(),
                    })
                }
            };
        }

        // Reachable only when the fallback strategy was removed.
        Err(ParseFailure {
            error: ParseError::unsupported().with_message(format!(
                "no strategy accepts input of type `{}`.",
                input.type_name(),
            )),
            strategy: None,
            elapsed: ctx.elapsed(),
        })
    }
}

/// The process-wide default parser behind [`parse`].
#[must_use]
pub fn default_parser() -> &'static InputParser {
    static PARSER: OnceLock<InputParser> = OnceLock::new();
    PARSER.get_or_init(InputParser::new)
}

/// Parses one input with the process-wide default parser.
pub fn parse(input: impl Into<TemporalInput>, options: &ParseOptions) -> ParseOutcome {
    default_parser().parse(input, options)
}
