use anyhow::Result;
use phonefield_core::{PhoneResolver, Session};
use phonefield_numbering::PhonenumberPlan;
use phonefield_store::Store;
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod phone;
pub mod users;

pub struct Context<'a> {
    pub store: &'a Store,
    pub plan: &'a PhonenumberPlan,
    pub session: Session,
    pub json: bool,
}

impl Context<'_> {
    pub fn resolver(&self) -> PhoneResolver<'_, PhonenumberPlan, Store> {
        PhoneResolver::new(self.plan, self.store)
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
