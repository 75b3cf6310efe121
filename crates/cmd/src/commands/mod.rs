// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod describe;
pub mod load;
pub mod run;
pub mod tables;

pub use describe::describe_tables;
pub use load::{Registration, load_csv_files};
pub use run::{RunOptions, RunSummary, run_sql_file};
pub use tables::show_tables;
