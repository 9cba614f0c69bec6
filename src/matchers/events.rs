//! Matchers over an [`EventSpy`].

use crate::detail::{deep_equal, Detail};
use crate::error::{MatcherError, Result};
use crate::received::Received;
use crate::sink::{AssertionSink, MatchResult};
use crate::spy::{EventSpy, SpyEvent};
use super::not;

fn event_spy<'a>(received: &Received<'a>, matcher: &'static str) -> Result<&'a EventSpy> {
    received.check_resolved(matcher, "event spy")?;
    match *received {
        Received::Spy(spy) if !spy.event_name.is_empty() => Ok(spy),
        _ => Err(MatcherError::NotAnEventSpy { matcher }),
    }
}

pub fn to_have_received_event(received: &Received<'_>) -> Result<MatchResult> {
    let spy = event_spy(received, "toHaveReceivedEvent")?;
    let pass = !spy.is_empty();
    Ok(MatchResult::new(
        pass,
        format!(
            "expected to have {}called \"{}\" event",
            not(pass),
            spy.event_name
        ),
    ))
}

pub fn to_have_received_event_times(received: &Received<'_>, count: usize) -> Result<MatchResult> {
    let spy = event_spy(received, "toHaveReceivedEventTimes")?;
    let pass = spy.len() == count;
    Ok(MatchResult::new(
        pass,
        format!(
            "expected event \"{}\" to have been called {} times, but was called {} time{}",
            spy.event_name,
            count,
            spy.len(),
            if spy.len() > 1 { "s" } else { "" }
        ),
    ))
}

fn compare_detail(
    spy: &EventSpy,
    event: &SpyEvent,
    expected: &Detail,
    sink: &mut dyn AssertionSink,
) -> MatchResult {
    let pass = deep_equal(&event.detail, expected);
    sink.expect_detail_eq(&event.detail, expected);
    MatchResult::new(
        pass,
        format!(
            "expected event \"{}\" detail to {}equal",
            spy.event_name,
            not(pass)
        ),
    )
}

/// Compare the detail of the most recent event.
pub fn to_have_received_event_detail(
    received: &Received<'_>,
    expected: &Detail,
    sink: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    let spy = event_spy(received, "toHaveReceivedEventDetail")?;
    let event = spy
        .last_event()
        .ok_or_else(|| MatcherError::EventNotReceived(spy.event_name.clone()))?;
    Ok(compare_detail(spy, event, expected, sink))
}

pub fn to_have_first_received_event_detail(
    received: &Received<'_>,
    expected: &Detail,
    sink: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    let spy = event_spy(received, "toHaveFirstReceivedEventDetail")?;
    let event = spy
        .first_event()
        .ok_or_else(|| MatcherError::EventNotReceived(spy.event_name.clone()))?;
    Ok(compare_detail(spy, event, expected, sink))
}

pub fn to_have_last_received_event_detail(
    received: &Received<'_>,
    expected: &Detail,
    sink: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    let spy = event_spy(received, "toHaveLastReceivedEventDetail")?;
    let event = spy
        .last_event()
        .ok_or_else(|| MatcherError::EventNotReceived(spy.event_name.clone()))?;
    Ok(compare_detail(spy, event, expected, sink))
}

pub fn to_have_nth_received_event_detail(
    received: &Received<'_>,
    index: usize,
    expected: &Detail,
    sink: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    let spy = event_spy(received, "toHaveNthReceivedEventDetail")?;
    if spy.is_empty() {
        return Err(MatcherError::EventNotReceived(spy.event_name.clone()));
    }
    let event = spy
        .events
        .get(index)
        .ok_or(MatcherError::EventIndexOutOfRange(index))?;
    Ok(compare_detail(spy, event, expected, sink))
}
