mod header;
mod page;
mod panes;

pub use page::PracticeView;

#[cfg(test)]
pub(crate) use page::PracticeTestHandles;
