//! Cron jobs for session housekeeping and data cleanup.

pub mod maintenance;

#[cfg(test)]
mod test;
