//! Object storage adapters

mod supabase;

pub use supabase::SupabaseObjectStore;
