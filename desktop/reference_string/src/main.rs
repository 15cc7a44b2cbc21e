/*
 *  Copyright (C) 2025  Markus Elias Gerber
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::{env, num::ParseIntError, process::ExitCode};

use clock_mmu::{AccessOutcome, MemoryManagementUnit, MmuConfig, MmuError};
use log::error;

/// used if no arguments are given
const DEFAULT_PAGE_TABLE_SIZE: usize = 4;
const DEFAULT_BITS_FOR_OFFSET: u32 = 0;
const DEFAULT_REFERENCE_STRING: [u32; 5] = [0, 1, 0, 2, 3];

fn parse_number(arg: &str) -> Result<u64, ParseIntError> {
    match arg.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => arg.parse(),
    }
}

fn parse_args(args: &[String]) -> Result<(MmuConfig, Vec<u32>), String> {
    if args.is_empty() {
        return Ok((
            MmuConfig::new(DEFAULT_PAGE_TABLE_SIZE, DEFAULT_BITS_FOR_OFFSET),
            DEFAULT_REFERENCE_STRING.to_vec(),
        ));
    }

    if args.len() < 2 {
        return Err("usage: reference_string <page_table_size> <bits_for_offset> [address...]".into());
    }

    let page_table_size = parse_number(&args[0])
        .map_err(|e| format!("invalid page table size {:?}: {}", args[0], e))?;
    let bits_for_offset = parse_number(&args[1])
        .map_err(|e| format!("invalid offset width {:?}: {}", args[1], e))?;

    let mut addresses = Vec::with_capacity(args.len() - 2);
    for arg in &args[2..] {
        let address = parse_number(arg)
            .ok()
            .and_then(|address| u32::try_from(address).ok())
            .ok_or_else(|| format!("invalid address {:?}", arg))?;
        addresses.push(address);
    }

    let config = MmuConfig::new(
        usize::try_from(page_table_size).map_err(|e| e.to_string())?,
        u32::try_from(bits_for_offset).map_err(|e| e.to_string())?,
    );
    Ok((config, addresses))
}

fn run(config: MmuConfig, addresses: &[u32]) -> Result<(), MmuError> {
    let mut mmu = MemoryManagementUnit::new(config)?;

    for address in addresses {
        let access = mmu.access(*address)?;

        let outcome = match access.outcome {
            AccessOutcome::Hit { .. } => "hit".to_string(),
            AccessOutcome::Fault {
                evicted_page: None, ..
            } => "fault".to_string(),
            AccessOutcome::Fault {
                evicted_page: Some(page),
                ..
            } => format!("fault, evicted page {}", page),
        };

        println!(
            "{:#010x} {} -> {} {:#x} ({}, free frames: {}, clock hand: {})",
            address,
            access.logical_address,
            access.outcome.frame(),
            access.physical_address,
            outcome,
            mmu.free_frame_count(),
            mmu.replacement_module().hand()
        );
    }

    let stats = mmu.statistics();
    println!();
    println!(
        "accesses: {}, hits: {}, faults: {} ({:.1}%), evictions: {}, longest sweep: {}",
        stats.accesses,
        stats.hits,
        stats.faults,
        stats.fault_rate() * 100.0,
        stats.evictions,
        stats.longest_sweep
    );

    Ok(())
}

fn main() -> ExitCode {
    use env_logger::{Builder, Env};
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_module_path(false)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (config, addresses) = match parse_args(&args) {
        Ok(res) => res,
        Err(message) => {
            error!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(config, &addresses) {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
