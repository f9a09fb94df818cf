mod discovery;
mod reachability;
mod transfer;
mod util;
