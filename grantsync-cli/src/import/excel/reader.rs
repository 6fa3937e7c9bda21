//! Read positionally-aligned grant rows from an Excel workbook
//!
//! The workbook carries three sheets (Users, Roles, Customers), each with
//! its natural key in the first column. Rows are associated across sheets
//! by position, not by key.

use std::io::{Read, Seek};
use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};

use crate::import::error::ImportError;
use crate::import::types::GrantRow;

const USERS_SHEET: &str = "Users";
const ROLES_SHEET: &str = "Roles";
const CUSTOMERS_SHEET: &str = "Customers";

/// Read the three key columns and align them row by row.
///
/// The header row of each sheet is skipped and empty cells are dropped
/// before alignment. Sheet lengths may differ; the shortest wins and the
/// mismatch is logged as a warning rather than failing the run.
pub fn read_grant_rows(path: &Path) -> Result<Vec<GrantRow>, ImportError> {
    if !path.exists() {
        return Err(ImportError::SourceNotFound(path.to_path_buf()));
    }

    log::info!("Reading workbook: {}", path.display());

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
        ImportError::SchemaMismatch(format!("Failed to open workbook {}: {}", path.display(), e))
    })?;

    let users = read_key_column(&mut workbook, USERS_SHEET)?;
    let roles = read_key_column(&mut workbook, ROLES_SHEET)?;
    let customers = read_key_column(&mut workbook, CUSTOMERS_SHEET)?;

    let count = users.len().min(roles.len()).min(customers.len());
    if users.len() != roles.len() || roles.len() != customers.len() {
        log::warn!(
            "Sheet row counts differ: Users={}, Roles={}, Customers={}. Using minimum length: {}",
            users.len(),
            roles.len(),
            customers.len(),
            count
        );
    }

    let mut rows = Vec::with_capacity(count);
    for i in 0..count {
        rows.push(GrantRow {
            row: i + 1,
            email: users[i].clone(),
            role_name: roles[i].clone(),
            customer_name: customers[i].clone(),
        });
    }

    log::info!("Read {} rows from workbook", rows.len());

    Ok(rows)
}

/// Key values from the first column of a sheet, header skipped, empty
/// cells dropped
fn read_key_column<R: Read + Seek>(
    workbook: &mut Xlsx<R>,
    sheet: &str,
) -> Result<Vec<String>, ImportError> {
    let range = workbook.worksheet_range(sheet).map_err(|_| {
        ImportError::SchemaMismatch(format!(
            "Required sheet '{}' not found in workbook. Available sheets: {}",
            sheet,
            workbook.sheet_names().join(", ")
        ))
    })?;

    Ok(range
        .rows()
        .skip(1)
        .filter_map(|row| cell_string(row.first()?))
        .collect())
}

fn cell_string(cell: &Data) -> Option<String> {
    let s = match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        _ => String::new(),
    };

    if s.is_empty() { None } else { Some(s) }
}
