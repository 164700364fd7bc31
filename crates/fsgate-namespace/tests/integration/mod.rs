mod ownership;
mod traversal;
