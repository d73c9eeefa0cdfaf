pub mod llm;
pub mod vercel;
