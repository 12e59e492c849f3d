use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use crate::errors::SoulboundError;
use crate::events::DropFunded;
use crate::state::RetroDrop;

#[derive(Accounts)]
pub struct FundRetroDrop<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"retro_drop"],
        bump = retro_drop.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub retro_drop: Account<'info, RetroDrop>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<FundRetroDrop>, amount: u64) -> Result<()> {
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.authority.to_account_info(),
                to: ctx.accounts.retro_drop.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(DropFunded {
        authority: ctx.accounts.authority.key(),
        amount,
    });

    msg!(
        "Funded retro drop with {} lamports (balance: {})",
        amount,
        ctx.accounts.retro_drop.to_account_info().lamports()
    );

    Ok(())
}
