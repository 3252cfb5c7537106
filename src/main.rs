// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use service_revision::cli::{commands::Commands, CliArgs};
use tracing::Level;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Initialize tracing; stdout is reserved for the rendered descriptor
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Commands::Build(cmd) => cmd.execute(),
        Commands::Revise(cmd) => cmd.execute(),
        Commands::Summary(cmd) => cmd.execute(),
    }
}
