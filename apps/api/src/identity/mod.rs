// Identity lookups: users, organizations, memberships. The gateway owns
// sign-up and Clerk sync; this service only reads.

pub mod handlers;
pub mod store;
