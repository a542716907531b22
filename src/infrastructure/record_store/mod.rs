//! Record store adapters

mod supabase;

pub use supabase::SupabaseRecordStore;
