// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use termcolor::Color;

// NOTE: NO_COLOR and COLOR handling is covered in tests/specs.rs because
// env var manipulation is not safe in parallel unit tests.

#[test]
fn scheme_suite_name_is_bold() {
    let spec = scheme::suite_name();
    assert!(spec.bold());
    assert!(spec.fg().is_none());
}

#[test]
fn scheme_fail_is_red_bold() {
    let spec = scheme::fail();
    assert_eq!(spec.fg(), Some(&Color::Red));
    assert!(spec.bold());
}

#[test]
fn scheme_pass_is_green_bold() {
    let spec = scheme::pass();
    assert_eq!(spec.fg(), Some(&Color::Green));
    assert!(spec.bold());
}

#[test]
fn scheme_skip_is_yellow_bold() {
    let spec = scheme::skip();
    assert_eq!(spec.fg(), Some(&Color::Yellow));
    assert!(spec.bold());
}

#[test]
fn scheme_detail_is_dimmed() {
    let spec = scheme::detail();
    assert!(spec.dimmed());
    assert!(spec.fg().is_none());
}
