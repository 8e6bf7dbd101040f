#![allow(dead_code)]

pub mod recording_notifier;
