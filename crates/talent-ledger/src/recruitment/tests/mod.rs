mod common;
mod ledger;
mod status;
