use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use crate::errors::SoulboundError;
use crate::events::RewardsFunded;
use crate::state::RewardEngine;

#[derive(Accounts)]
pub struct Fund<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"reward_engine"],
        bump = reward_engine.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub reward_engine: Account<'info, RewardEngine>,

    pub system_program: Program<'info, System>,
}

/// The only deposit path into the engine's balance
pub fn handler(ctx: Context<Fund>, amount: u64) -> Result<()> {
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.authority.to_account_info(),
                to: ctx.accounts.reward_engine.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(RewardsFunded {
        authority: ctx.accounts.authority.key(),
        amount,
    });

    msg!(
        "Funded reward engine with {} lamports (balance: {})",
        amount,
        ctx.accounts.reward_engine.to_account_info().lamports()
    );

    Ok(())
}
