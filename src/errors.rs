/**
 * ItemSim
 * Copyright (C) 2026 The ItemSim developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use std::error;
use std::fmt;
use std::io;

/// Errors surfaced by the batch pipeline and the serving interface. Batch
/// errors abort the batch and leave previously published artifacts untouched;
/// serving errors are per-request.
#[derive(Debug)]
pub enum Error {
    /// An ingested record had a value that could not be parsed or was not finite.
    MalformedRecord(String),
    /// A user identifier was never seen during encoding.
    UnknownUser(String),
    /// An item identifier was never seen during encoding.
    UnknownItem(String),
    /// An internal index was never assigned during encoding.
    UnknownIndex(u32),
    /// A malformed request parameter, such as a zero result count.
    InvalidArgument(String),
    Io(io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedRecord(details) => write!(f, "malformed record: {}", details),
            Error::UnknownUser(user) => write!(f, "unknown user: {}", user),
            Error::UnknownItem(item) => write!(f, "unknown item: {}", item),
            Error::UnknownIndex(index) => write!(f, "unknown index: {}", index),
            Error::InvalidArgument(details) => write!(f, "invalid argument: {}", details),
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Csv(e) => write!(f, "csv error: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
