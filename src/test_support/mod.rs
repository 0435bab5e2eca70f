// Items in this module (and submodules) are only used in test code,
// so we disable the unused_imports warning.

mod temp_repo;

#[allow(unused_imports)]
pub(crate) use temp_repo::TempRepo;
